//! Static option catalogs offered to block editors.
//!
//! Each catalog is an ordered list of `(id, label)` pairs. Ids are what the
//! remote APIs expect; labels are what the dashboard shows when describing an
//! active filter. Catalogs backed by a remote listing (story topics, news API
//! sources) live in `uwdash-feeds::options`.

use serde::Serialize;

const NEWS_SITES: &[(&str, &str)] = &[
    ("all", "All"),
    ("39", "Arts"),
    ("142", "Engineering"),
    ("245", "Environment"),
    ("1240", "Graduate Studies and Postdoctoral Affairs"),
    ("11", "Health"),
    ("286", "Mathematics"),
    ("473", "Registrar's Office"),
    ("287", "Science"),
];

const CATEGORIES: &[(&str, &str)] = &[
    ("business", "Business"),
    ("entertainment", "Entertainment"),
    ("general", "General"),
    ("health", "Health"),
    ("science", "Science"),
    ("sports", "Sports"),
    ("technology", "Technology"),
];

// Country codes accepted by the top-headlines endpoint.
const COUNTRIES: &[(&str, &str)] = &[
    ("ar", "Argentina"),
    ("au", "Australia"),
    ("be", "Belgium"),
    ("br", "Brazil"),
    ("bg", "Bulgaria"),
    ("ca", "Canada"),
    ("cn", "China"),
    ("co", "Colombia"),
    ("cu", "Cuba"),
    ("cz", "Czechia"),
    ("de", "Germany"),
    ("eg", "Egypt"),
    ("fr", "France"),
    ("gr", "Greece"),
    ("hk", "Hong Kong"),
    ("hu", "Hungary"),
    ("id", "Indonesia"),
    ("ie", "Ireland"),
    ("il", "Israel"),
    ("in", "India"),
    ("it", "Italy"),
    ("jp", "Japan"),
    ("lv", "Latvia"),
    ("lt", "Lithuania"),
    ("my", "Malaysia"),
    ("mx", "Mexico"),
    ("ma", "Morocco"),
    ("nl", "Netherlands"),
    ("ng", "Nigeria"),
    ("no", "Norway"),
    ("ph", "Philippines"),
    ("pl", "Poland"),
    ("pt", "Portugal"),
    ("ro", "Romania"),
    ("ru", "Russian Federation"),
    ("sa", "Saudi Arabia"),
    ("rs", "Serbia"),
    ("sg", "Singapore"),
    ("sk", "Slovakia"),
    ("si", "Slovenia"),
    ("za", "South Africa"),
    ("kr", "South Korea"),
    ("se", "Sweden"),
    ("ch", "Switzerland"),
    ("tw", "Taiwan"),
    ("th", "Thailand"),
    ("tr", "Turkey"),
    ("ua", "Ukraine"),
    ("ae", "United Arab Emirates"),
    ("gb", "United Kingdom"),
    ("us", "United States of America"),
    ("ve", "Venezuela (Bolivarian Republic)"),
];

// Language codes accepted by the everything endpoint.
const LANGUAGES: &[(&str, &str)] = &[
    ("all", "All"),
    ("ar", "Arabic"),
    ("zh", "Chinese"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("he", "Hebrew"),
    ("it", "Italian"),
    ("no", "Norwegian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("se", "Sami"),
];

const SORT_ORDERS: &[(&str, &str)] = &[
    (
        "relevancy",
        "Articles more closely related to keywords come first",
    ),
    (
        "popularity",
        "Articles from popular sources and publishers come first",
    ),
    ("publishedAt", "Newest articles come first"),
];

/// A statically known option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Catalog {
    /// Faculty/department sites for the campus news block.
    NewsSite,
    /// Global news categories.
    Category,
    Country,
    Language,
    SortBy,
}

impl Catalog {
    pub const ALL: [Catalog; 5] = [
        Catalog::NewsSite,
        Catalog::Category,
        Catalog::Country,
        Catalog::Language,
        Catalog::SortBy,
    ];

    #[must_use]
    pub fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Catalog::NewsSite => NEWS_SITES,
            Catalog::Category => CATEGORIES,
            Catalog::Country => COUNTRIES,
            Catalog::Language => LANGUAGES,
            Catalog::SortBy => SORT_ORDERS,
        }
    }

    /// Returns the display label for `id`, if the catalog contains it.
    #[must_use]
    pub fn label(self, id: &str) -> Option<&'static str> {
        self.entries()
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, label)| *label)
    }

    #[must_use]
    pub fn contains(self, id: &str) -> bool {
        self.label(id).is_some()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Catalog::NewsSite => "news_site",
            Catalog::Category => "category",
            Catalog::Country => "country",
            Catalog::Language => "language",
            Catalog::SortBy => "sort_by",
        }
    }
}

impl std::str::FromStr for Catalog {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Catalog::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown catalog '{s}'"))
    }
}
