use shelf_core::wire_enum;

wire_enum! {
    /// Account role.
    pub enum UserType: "UserType" as str {
        Root = "root",
        Admin = "admin",
        User = "user",
        Guest = "guest",
    }
}

wire_enum! {
    /// Kind of media a library holds.
    pub enum MediaType: "MediaType" as str {
        Book = "book",
        Podcast = "podcast",
    }
}

wire_enum! {
    /// Cover aspect ratio a library renders with; sent as `0`/`1`.
    pub enum CoverAspectRatio: "CoverAspectRatio" as int {
        Standard = 0,
        Square = 1,
    }
}

wire_enum! {
    /// Extra sections requested alongside a single library.
    pub enum LibraryInclude: "LibraryInclude" as str {
        FilterData = "filterdata",
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Book => write!(f, "Books"),
            MediaType::Podcast => write!(f, "Podcasts"),
        }
    }
}

impl CoverAspectRatio {
    pub fn from_square(square: bool) -> Self {
        if square {
            CoverAspectRatio::Square
        } else {
            CoverAspectRatio::Standard
        }
    }
}
