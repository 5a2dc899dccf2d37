/// Workbook sheet names
pub const GHG_SHEET: &str = "GHG Data";
pub const WEATHER_SHEET: &str = "AWS Data";
pub const AGB_SHEET: &str = "Carbon_AGB";
pub const BGB_SHEET: &str = "Carbon_BGB";

/// Column names shared across sheets
pub const DATE_COLUMN: &str = "Date";
pub const SITE_COLUMN: &str = "Site";
pub const REGION_COLUMN: &str = "Region";
pub const TREATMENT_COLUMN: &str = "Treatment";
pub const TYPE_COLUMN: &str = "Type";

/// GHG flux columns
pub const CO2_COLUMN: &str = "CO2";
pub const CH4_COLUMN: &str = "CH4";

/// Weather station columns
pub const HUMIDITY_COLUMN: &str = "RH, %";
pub const RAIN_COLUMN: &str = "Rain, mm";
pub const TEMPERATURE_COLUMN: &str = "Temp, °C";

/// Above-ground biomass selectors
pub const AGB_ATTRIBUTES: &[&str] = &[
    "dbh",
    "Wood density (g cm3)",
    "TAGB (kg) (Chave, 2005)",
    "TAGB (kg) (Manuri, 2014)",
    "TAGB",
    "C",
];
pub const AGB_CATEGORIES: &[&str] = &["Spp_Sci", "Fam"];

/// Below-ground biomass selectors
pub const BGB_ATTRIBUTES: &[&str] = &[
    "Depth",
    "Depth of sample",
    "BD (g/cm3)",
    "%C",
    "%N",
    "C Mg/ha",
    "N Mg/ha",
    "C Mg/ha (peat layers only)",
    "N Mg/ha (peat layers only)",
];
pub const BGB_CATEGORIES: &[&str] = &["Region", "Land cover", "Site"];

/// Option sentinel meaning "no constraint"
pub const ALL_SENTINEL: &str = "All";

/// Page texture
pub const DASHBOARD_TITLE: &str = "NCS Data Hub (Plug & Play Version)";
pub const SERIES_COLOR: &str = "#007BFF";
pub const LUX_THEME_URL: &str =
    "https://stackpath.bootstrapcdn.com/bootswatch/4.5.2/lux/bootstrap.min.css";
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Serving defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DEBUG: bool = true;
pub const DEFAULT_WORKBOOK: &str = "Database.xlsx";
pub const DEFAULT_LOGO_LEFT: &str = "logo1.png";
pub const DEFAULT_LOGO_RIGHT: &str = "logo2.png";

/// Summary rounding
pub const SUMMARY_DECIMALS: i32 = 2;
