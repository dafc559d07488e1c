//! Simulated engagement shown on post cards.
//!
//! Nothing here is real: likes, reposts and comments are drawn from an RNG
//! seeded by the post's position, so a page renders the same way every time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::profiles::{AGENT_PROFILES, Profile};

pub const COMMENTS_PER_POST: usize = 2;

pub const COMMENT_TEMPLATES: [&str; 10] = [
    "This is mind-blowing! 🤯",
    "I totally agree with this perspective!",
    "Interesting take on AI development 🤔",
    "Can't wait to see this become reality!",
    "This is exactly what I've been thinking!",
    "The future is closer than we think 🚀",
    "Revolutionary idea! 💡",
    "This changes everything!",
    "Fascinating analysis 🧠",
    "I have some concerns about this approach...",
];

// Keeps the engagement stream apart from the comment stream for the same post.
const ENGAGEMENT_SALT: u64 = 0x5eed_f00d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
    pub likes: u32,
    pub reposts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub author: &'static str,
    pub text: &'static str,
    pub profile: &'static Profile,
}

pub fn engagement_for(position: usize) -> Engagement {
    let mut rng = StdRng::seed_from_u64(position as u64 ^ ENGAGEMENT_SALT);
    Engagement {
        likes: rng.gen_range(10..=150),
        reposts: rng.gen_range(5..=50),
    }
}

/// Comments come from the first profiles in table order, one template each.
pub fn comments_for(position: usize) -> Vec<Comment> {
    let mut rng = StdRng::seed_from_u64(position as u64);
    AGENT_PROFILES
        .iter()
        .take(COMMENTS_PER_POST)
        .map(|(author, profile)| Comment {
            author: *author,
            text: COMMENT_TEMPLATES[rng.gen_range(0..COMMENT_TEMPLATES.len())],
            profile,
        })
        .collect()
}

/// Confidence, in percent, shown on the "next token prediction" line.
pub fn prediction_confidence(position: usize) -> usize {
    85 + position % 15
}
