//! Auction filtering and ranking
//!
//! Names are matched case-insensitively against any of the keywords; lore is
//! matched case-sensitively against both required strings. Lore carries
//! formatting codes and exact stat lines, so it is compared verbatim.

use crate::api::AuctionRecord;

/// What a scan is looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    /// Lower-cased name fragments, any of which may match
    name_keywords: Vec<String>,

    /// First string the lore must contain
    pub required_text_1: String,

    /// Second string the lore must contain
    pub required_text_2: String,
}

impl MatchCriteria {
    /// Creates criteria from keywords and two required lore strings
    ///
    /// Keywords are lower-cased and de-duplicated, keeping first occurrence
    /// order. An empty keyword list matches no name.
    pub fn new<I, S>(
        keywords: I,
        required_text_1: impl Into<String>,
        required_text_2: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name_keywords: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if !name_keywords.contains(&keyword) {
                name_keywords.push(keyword);
            }
        }

        Self {
            name_keywords,
            required_text_1: required_text_1.into(),
            required_text_2: required_text_2.into(),
        }
    }

    /// Creates criteria from a comma-separated keyword filter
    ///
    /// Pieces are trimmed and empty pieces dropped. A filter with no
    /// keywords at all becomes the empty keyword, which matches every name.
    ///
    /// # Example
    ///
    /// ```
    /// use auction_scout::MatchCriteria;
    ///
    /// let criteria = MatchCriteria::from_filter("Hyperion, Valkyrie", "Wise", "");
    /// assert_eq!(criteria.name_keywords(), ["hyperion", "valkyrie"]);
    /// ```
    pub fn from_filter(
        filter: &str,
        required_text_1: impl Into<String>,
        required_text_2: impl Into<String>,
    ) -> Self {
        let mut keywords: Vec<&str> = filter
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect();

        if keywords.is_empty() {
            keywords.push("");
        }

        Self::new(keywords, required_text_1, required_text_2)
    }

    /// The lower-cased name keywords
    pub fn name_keywords(&self) -> &[String] {
        &self.name_keywords
    }

    /// Checks a record against the criteria
    pub fn matches(&self, record: &AuctionRecord) -> bool {
        let name = record.name.to_lowercase();
        self.name_keywords
            .iter()
            .any(|keyword| name.contains(keyword.as_str()))
            && record.lore.contains(self.required_text_1.as_str())
            && record.lore.contains(self.required_text_2.as_str())
    }
}

/// A matching auction, as handed to the presenter
///
/// `name` is the lower-cased item name the keywords were matched against.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundItem {
    pub name: String,
    pub price: f64,
    pub id: String,
}

impl From<&AuctionRecord> for FoundItem {
    fn from(record: &AuctionRecord) -> Self {
        Self {
            name: record.name.to_lowercase(),
            price: record.starting_price,
            id: record.id.clone(),
        }
    }
}

/// Filters records and orders the matches by ascending price
///
/// The sort is stable: equally priced matches keep their input order.
pub fn filter_and_sort<'a, I>(records: I, criteria: &MatchCriteria) -> Vec<FoundItem>
where
    I: IntoIterator<Item = &'a AuctionRecord>,
{
    let mut found: Vec<FoundItem> = records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .map(FoundItem::from)
        .collect();

    found.sort_by(|a, b| a.price.total_cmp(&b.price));
    found
}
