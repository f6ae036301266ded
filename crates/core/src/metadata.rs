//! Randomized titles and descriptions for batch uploads.
//!
//! Generators take the RNG by reference so callers can pass a seeded
//! `StdRng` for reproducible output.

use crate::error::{Result, VidError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const CONNECTORS: &[&str] = &[
    "Guide to",
    "Tips for",
    "Tutorial on",
    "Look at",
    "Thoughts on",
    "Journey with",
];

const SUFFIXES: &[&str] = &[
    "2024", "2025", "Pro", "Guide", "Tutorial", "Tips", "Hacks", "Secrets",
];

const INTROS: &[&str] = &[
    "Hey everyone! In this video,",
    "Welcome back! Today",
    "What's up! I wanted to share",
    "Hello friends! Let's talk about",
    "Quick update:",
];

const OUTROS: &[&str] = &[
    "Let me know what you think in the comments!",
    "Don't forget to like and subscribe!",
    "Thanks for watching!",
    "See you in the next one!",
    "Drop a comment if you have questions!",
];

const STOCK_HASHTAGS: &[&str] = &["#viral", "#trending", "#shorts", "#tutorial"];

/// Highest number embedded in a title as `#N`.
pub const MAX_TITLE_NUMBER: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStyle {
    #[default]
    Casual,
    Professional,
    Trendy,
}

impl TitleStyle {
    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            TitleStyle::Casual => &["My", "Quick", "Simple", "Easy", "Fast", "Just", "Random"],
            TitleStyle::Professional => {
                &["Ultimate", "Complete", "Professional", "Advanced", "Essential"]
            }
            TitleStyle::Trendy => &["Insane", "Crazy", "Mind-blowing", "Secret", "Hidden", "Epic"],
        }
    }
}

impl fmt::Display for TitleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TitleStyle::Casual => "casual",
            TitleStyle::Professional => "professional",
            TitleStyle::Trendy => "trendy",
        };
        f.write_str(name)
    }
}

impl FromStr for TitleStyle {
    type Err = VidError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "casual" => Ok(TitleStyle::Casual),
            "professional" => Ok(TitleStyle::Professional),
            "trendy" => Ok(TitleStyle::Trendy),
            other => Err(VidError::InvalidInput(format!("unknown title style: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

pub fn generate_title<R: Rng + ?Sized>(rng: &mut R, topic: &str, style: TitleStyle) -> String {
    let num = rng.gen_range(1..=MAX_TITLE_NUMBER);
    let prefix = pick(rng, style.prefixes());
    let connector = pick(rng, CONNECTORS);
    let suffix = pick(rng, SUFFIXES);

    match rng.gen_range(0..5) {
        0 => format!("{} {} {} {} #{}", prefix, connector, topic, suffix, num),
        1 => format!("{} {} - {} Edition #{}", topic, suffix, prefix, num),
        2 => format!("{} {} {} {} #{}", prefix, topic, connector, suffix, num),
        3 => format!("#{} {} {} {}", num, prefix, topic, suffix),
        _ => format!("{} #{} - {} {}", topic, num, prefix, suffix),
    }
}

/// Hashtag derived from the topic: lowercased with spaces removed.
pub fn topic_hashtag(topic: &str) -> String {
    format!("#{}", topic.to_lowercase().replace(' ', ""))
}

pub fn generate_description<R: Rng + ?Sized>(rng: &mut R, topic: &str) -> String {
    let intro = pick(rng, INTROS);
    let middle = match rng.gen_range(0..5) {
        0 => format!("we're exploring {} in detail.", topic),
        1 => format!("I show you my approach to {}.", topic),
        2 => format!("we dive deep into {}.", topic),
        3 => format!("I share some tips about {}.", topic),
        _ => format!("we discuss everything about {}.", topic),
    };
    let outro = pick(rng, OUTROS);

    let mut hashtags: Vec<String> = STOCK_HASHTAGS.iter().map(|t| t.to_string()).collect();
    hashtags.push(topic_hashtag(topic));
    hashtags.shuffle(rng);
    let take = rng.gen_range(2..=4);
    let tag_string = hashtags[..take].join(" ");

    format!("{} {}\n\n{}\n\n{}", intro, middle, outro, tag_string)
}

/// `count` distinct titles, in the order they were first generated.
pub fn generate_batch_titles<R: Rng + ?Sized>(
    rng: &mut R,
    topic: &str,
    count: usize,
    style: TitleStyle,
) -> Result<Vec<String>> {
    let max_attempts = count.saturating_mul(50).max(1000);
    collect_unique(count, max_attempts, || generate_title(&mut *rng, topic, style))
}

pub fn generate_metadata<R: Rng + ?Sized>(
    rng: &mut R,
    topic: &str,
    count: usize,
    style: TitleStyle,
    with_description: bool,
) -> Result<Vec<VideoMetadata>> {
    let titles = generate_batch_titles(rng, topic, count, style)?;
    Ok(titles
        .into_iter()
        .map(|title| VideoMetadata {
            title,
            description: with_description.then(|| generate_description(&mut *rng, topic)),
        })
        .collect())
}

/// First `max_chars` characters of `text` followed by `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

fn collect_unique<F>(count: usize, max_attempts: usize, mut generate: F) -> Result<Vec<String>>
where
    F: FnMut() -> String,
{
    let mut seen = HashSet::with_capacity(count);
    let mut items = Vec::with_capacity(count);
    let mut attempts = 0;

    while items.len() < count {
        if attempts >= max_attempts {
            return Err(VidError::TitleSpaceExhausted {
                requested: count,
                produced: items.len(),
            });
        }
        attempts += 1;

        let candidate = generate();
        if seen.insert(candidate.clone()) {
            items.push(candidate);
        }
    }

    Ok(items)
}
