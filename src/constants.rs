/// Museum key constants used on the command line and in logs.
/// Display names match what each site calls itself.

// CLI keys
pub const SONGSHAN_API: &str = "songshan";
pub const NPM_API: &str = "npm";
pub const MOCA_API: &str = "moca";
pub const HUASHAN_API: &str = "huashan";
pub const FUBON_API: &str = "fubon";
pub const TFAM_API: &str = "tfam";
pub const NTNU_API: &str = "ntnu";

// Museum names (written verbatim into the 館別 column)
pub const SONGSHAN_MUSEUM_NAME: &str = "松山文創園區";
pub const NPM_MUSEUM_NAME: &str = "國立故宮博物院";
pub const MOCA_MUSEUM_NAME: &str = "台北當代藝術館";
pub const HUASHAN_MUSEUM_NAME: &str = "華山1914文化創意產業園區";
pub const FUBON_MUSEUM_NAME: &str = "富邦美術館";
pub const TFAM_MUSEUM_NAME: &str = "臺北市立美術館";
pub const NTNU_MUSEUM_NAME: &str = "國立臺灣師範大學-師大美術館";

// Site entry points
pub const SONGSHAN_BASE_URL: &str = "https://www.songshanculturalpark.org/";
pub const SONGSHAN_LIST_URL: &str = "https://www.songshanculturalpark.org/exhibition";
pub const NPM_BASE_URL: &str = "https://www.npm.gov.tw";
pub const NPM_LIST_URL: &str = "https://www.npm.gov.tw/Exhibition-Current.aspx?sno=03000060&l=1";
pub const MOCA_BASE_URL: &str = "https://www.moca.taipei/tw";
pub const MOCA_LIST_URL: &str = "https://www.moca.taipei/tw/ExhibitionAndEvent";
pub const HUASHAN_BASE_URL: &str = "https://www.huashan1914.com";
pub const HUASHAN_LIST_URL: &str = "https://www.huashan1914.com/w/huashan1914";
pub const FUBON_BASE_URL: &str = "https://www.fubonartmuseum.org";
pub const FUBON_LIST_URL: &str = "https://www.fubonartmuseum.org/Exhibitions";
pub const TFAM_BASE_URL: &str = "https://www.tfam.museum/";
pub const TFAM_LIST_URL: &str = "https://www.tfam.museum/Exhibition/Exhibition.aspx?ddlLang=zh-tw";
pub const NTNU_LIST_URL: &str = "https://www.artmuse.ntnu.edu.tw/index.php/current_exhibit/";

pub const DEFAULT_OUTPUT_FILE: &str = "all_museums_exhibitions.csv";

// Museum directory (Google Places text search)
pub const PLACES_API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";
pub const PLACES_SEARCH_URL: &str = "https://places.googleapis.com/v1/places:searchText";
pub const PLACES_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.types,places.websiteUri,places.internationalPhoneNumber,places.rating,places.regularOpeningHours.weekdayDescriptions,nextPageToken";

/// Museum and gallery searches across Taipei and New Taipei
pub const DIRECTORY_KEYWORDS: &[&str] = &[
    "台北市 博物館",
    "台北市 美術館",
    "museum in Taipei City",
    "art museum Taipei",
    "新北市 博物館",
    "新北市 美術館",
    "museum in New Taipei City",
    "art museum New Taipei",
];

/// The two creative parks are queried by name; Places does not type them as museums
pub const DIRECTORY_PARK_QUERIES: &[&str] = &[HUASHAN_MUSEUM_NAME, SONGSHAN_MUSEUM_NAME];

/// Place ids of the main Huashan and Songshan park entries
pub const DIRECTORY_PARK_IDS: &[&str] = &["ChIJbSTgI2WpQjQRcVwWB2cnyfE", "ChIJO0vOI7-rQjQR3Pl9_4cPK8g"];

pub const DIRECTORY_MUSEUM_TYPES: &[&str] = &["museum", "art_gallery"];

pub const DEFAULT_DIRECTORY_FILE: &str = "taipei_museums_info.csv";
