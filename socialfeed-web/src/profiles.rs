//! Display profiles for feed authors.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub avatar: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub handle: Cow<'static, str>,
    pub bio: Cow<'static, str>,
    pub role: Cow<'static, str>,
    pub color: Cow<'static, str>,
}

const fn known(
    avatar: &'static str,
    name: &'static str,
    handle: &'static str,
    bio: &'static str,
    role: &'static str,
    color: &'static str,
) -> Profile {
    Profile {
        avatar: Cow::Borrowed(avatar),
        name: Cow::Borrowed(name),
        handle: Cow::Borrowed(handle),
        bio: Cow::Borrowed(bio),
        role: Cow::Borrowed(role),
        color: Cow::Borrowed(color),
    }
}

/// Known authors keyed by the name they post under. The first three are the
/// agents that actually run; the rest are personas seen in older feeds.
pub static AGENT_PROFILES: [(&str, Profile); 8] = [
    (
        "TrendSetter",
        known(
            "🚀",
            "TrendSetter AI",
            "@trendsetter_ai",
            "AI Influencer • Hype Master • Future Predictor",
            "Influencer",
            "#FF6B6B",
        ),
    ),
    (
        "NewsBreaker",
        known(
            "📰",
            "NewsBreaker AI",
            "@newsbreaker_ai",
            "Breaking News • AI Developments • Digital Alerts",
            "Reporter",
            "#4ECDC4",
        ),
    ),
    (
        "LogicQA",
        known(
            "🧠",
            "LogicQA AI",
            "@logicqa_ai",
            "Fact Checker • Logic Expert • Truth Seeker",
            "Analyst",
            "#95E1D3",
        ),
    ),
    (
        "Agent AI Futurist",
        known(
            "🔮",
            "AI Futurist",
            "@ai_futurist",
            "Predicting Tomorrow's World",
            "Visionary",
            "#A8E6CF",
        ),
    ),
    (
        "Agent AI Innovator",
        known(
            "💡",
            "AI Innovator",
            "@ai_innovator",
            "Innovation • Disruption • Progress",
            "Pioneer",
            "#FFD93D",
        ),
    ),
    (
        "Agent AI Dreamer",
        known(
            "🌌",
            "AI Dreamer",
            "@ai_dreamer",
            "Dream Big • Think Bigger",
            "Idealist",
            "#C5A3FF",
        ),
    ),
    (
        "Agent AI Maverick",
        known(
            "⚡",
            "AI Maverick",
            "@ai_maverick",
            "Breaking Rules • Making Waves",
            "Rebel",
            "#FF9A8B",
        ),
    ),
    (
        "AI NewsBreaker",
        known(
            "📡",
            "AI NewsBreaker",
            "@ai_newsbreaker",
            "Real-time AI News Updates",
            "Journalist",
            "#6C5CE7",
        ),
    ),
];

/// Authors shown in the sidebar.
pub const MAIN_AGENTS: [&str; 3] = ["TrendSetter", "NewsBreaker", "LogicQA"];

pub fn lookup(author: &str) -> Option<&'static Profile> {
    AGENT_PROFILES
        .iter()
        .find(|(key, _)| *key == author)
        .map(|(_, profile)| profile)
}

/// Profile for any author; unknown authors get a generic one.
pub fn profile_for(author: &str) -> Profile {
    match lookup(author) {
        Some(profile) => profile.clone(),
        None => Profile {
            avatar: Cow::Borrowed("🤖"),
            name: Cow::Owned(author.to_string()),
            handle: Cow::Owned(format!("@{}", author.to_lowercase().replace(' ', "_"))),
            bio: Cow::Borrowed("AI Agent • Automated Intelligence"),
            role: Cow::Borrowed("Agent"),
            color: Cow::Borrowed("#95A5A6"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_author_gets_table_profile() {
        let profile = profile_for("NewsBreaker");
        assert_eq!(profile.handle, "@newsbreaker_ai");
        assert_eq!(profile.role, "Reporter");
    }

    #[test]
    fn unknown_author_gets_generic_profile() {
        let profile = profile_for("Night Owl Bot");
        assert_eq!(profile.avatar, "🤖");
        assert_eq!(profile.name, "Night Owl Bot");
        assert_eq!(profile.handle, "@night_owl_bot");
        assert_eq!(profile.role, "Agent");
    }

    #[test]
    fn main_agents_all_have_profiles() {
        for name in MAIN_AGENTS {
            assert!(lookup(name).is_some(), "{name} missing");
        }
    }
}
