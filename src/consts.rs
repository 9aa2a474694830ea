/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the date and an ignored time part (`2000-06-15T00:00:00Z`)
pub const TIME_SEPARATOR: char = 'T';
/// Separator used by the display format `DD/MM/YYYY`
pub const DISPLAY_SEPARATOR: char = '/';

/// Number of (month, day) pairs in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Default key under which the bearer token is stored
pub const DEFAULT_TOKEN_KEY: &str = "access_token";
/// Header carrying the bearer token to the profile API
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Wire value for centimeters
pub const UNIT_CENTIMETERS: &str = "cm";
/// Wire value for feet + inches
pub const UNIT_FEET_INCHES: &str = "ft";

/// Shortest accepted username, in characters
pub const MIN_USERNAME_LEN: usize = 3;
/// Shortest accepted password, in characters
pub const MIN_PASSWORD_LEN: usize = 6;
/// Longest accepted password, in characters
pub const MAX_PASSWORD_LEN: usize = 9;
/// A password must contain at least one of these
pub const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Profile payload field names, fixed by the external API.
pub mod field {
    pub const NAME: &str = "name";
    pub const BIRTHDAY: &str = "birthday";
    pub const HEIGHT: &str = "height";
    pub const WEIGHT: &str = "weight";
    pub const INTERESTS: &str = "interests";
    pub const GENDER: &str = "gender";
    pub const PROFILE_IMAGE: &str = "profileImage";
    pub const HEIGHT_UNIT: &str = "heightUnit";
    pub const HEIGHT_FEET: &str = "heightFeet";
    pub const HEIGHT_INCHES: &str = "heightInches";
    /// Envelope key some responses wrap the profile in
    pub const DATA: &str = "data";
}
