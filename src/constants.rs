pub mod roster {

    /// Size of the bulk-generated demo roster.
    pub const SAMPLE_PERSONNEL_COUNT: u64 = 77;

    /// Call sign given to vehicles created from a layout.
    pub const PLACEHOLDER_CALL_SIGN: &str = "Florian Schwedt 1/XX/1";

    /// Crew size given to vehicles created from a layout without seats.
    pub const DEFAULT_CREW_CAPACITY: u32 = 9;
}

pub mod session {

    pub const USER_KEY: &str = "username";

    pub const FLASH_KEY: &str = "_flashes";

    /// Upper bound for `server.session_inactivity_minutes`: one year.
    pub const MAX_INACTIVITY_MINUTES: i64 = 60 * 24 * 365;
}

pub mod notices {

    pub const LOGIN_REQUIRED: &str = "Bitte einloggen.";

    pub const FORBIDDEN: &str = "Keine Berechtigung.";

    pub const NAME_REQUIRED: &str = "Name darf nicht leer sein.";
}
