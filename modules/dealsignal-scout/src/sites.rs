use url::Url;

/// Selector configuration for one site. Selectors track live markup and are
/// expected to break when the site ships a redesign; a miss yields zero
/// items, never an error.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub name: &'static str,
    /// Matches the anchor elements that wrap one candidate item each.
    pub item_selector: &'static str,
    /// Element inside the anchor holding the title text. `None` means the
    /// anchor's own text is the title.
    pub title_selector: Option<&'static str>,
    /// Base for resolving relative hrefs.
    pub link_base: &'static str,
}

/// One page to fetch, with the source tag recorded on every item it yields.
#[derive(Debug, Clone)]
pub struct ScrapeTarget {
    pub tag: String,
    pub url: String,
}

// --- Quora ---

pub const QUORA_TOPICS: &[&str] = &[
    "virtual-data-rooms-VDR",
    "Mergers-and-Acquisitions-M-A",
    "Due-Diligence",
    "Investment-Banking",
    "Venture-Capital",
    "Startups",
];

pub fn quora() -> SiteProfile {
    SiteProfile {
        name: "quora",
        item_selector: r#"a[href*="/question/"]"#,
        title_selector: Some("span.qu-bold"),
        link_base: "https://www.quora.com",
    }
}

pub fn quora_targets(topics: &[&str]) -> Vec<ScrapeTarget> {
    topics
        .iter()
        .map(|topic| ScrapeTarget {
            tag: topic.to_string(),
            url: format!("https://www.quora.com/topic/{topic}/all_questions"),
        })
        .collect()
}

// --- Reddit ---

pub const SUBREDDITS: &[&str] = &[
    "investing",
    "venturecapital",
    "startups",
    "finance",
    "law",
    "business",
];

pub const KEYWORDS: &[&str] = &[
    "virtual data room",
    "vdr",
    "mergers and acquisitions",
    "due diligence",
    "dealsignal",
];

pub fn reddit() -> SiteProfile {
    SiteProfile {
        name: "reddit",
        item_selector: "a.search-title",
        title_selector: None,
        link_base: "https://old.reddit.com",
    }
}

/// One search page per (subreddit, keyword) pair, newest first, past week.
pub fn reddit_targets(subreddits: &[&str], keywords: &[&str]) -> Vec<ScrapeTarget> {
    let mut targets = Vec::new();
    for sub in subreddits {
        for keyword in keywords {
            let url = Url::parse_with_params(
                &format!("https://old.reddit.com/r/{sub}/search"),
                &[
                    ("q", *keyword),
                    ("restrict_sr", "on"),
                    ("sort", "new"),
                    ("t", "week"),
                ],
            )
            .expect("static search URL is valid");
            targets.push(ScrapeTarget {
                tag: format!("r/{sub}:{keyword}"),
                url: url.to_string(),
            });
        }
    }
    targets
}
