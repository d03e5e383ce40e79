// Oracle: keyword-driven advisory engine.
//
// Queries are lowercased and run through an ordered rule table. The first
// rule whose predicate holds and whose responder yields text wins. If no rule
// fires, one of the fallback prompts is picked with the shared random source.

pub mod templates;

use crate::cards::{format_usd, top_opportunities, Listing};
use crate::simulate::SimRng;
use serde::Serialize;
use std::fmt::Write as _;

/// Which canned response a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    JordanSell,
    MahomesSell,
    JordanRookie,
    MahomesRookie,
    JordanInvestment,
    MahomesInvestment,
    Jordan,
    Mahomes,
    Wembanyama,
    Burrow,
    GradingDecision,
    GradingMasterclass,
    TopOpportunities,
    InvestmentOutlook,
    SellTiming,
    MarketAnalysis,
    Portfolio,
    SellingStrategy,
    Budget,
    Fallback,
}

impl Topic {
    pub fn is_jordan(self) -> bool {
        matches!(
            self,
            Topic::Jordan | Topic::JordanSell | Topic::JordanRookie | Topic::JordanInvestment
        )
    }

    pub fn is_mahomes(self) -> bool {
        matches!(
            self,
            Topic::Mahomes | Topic::MahomesSell | Topic::MahomesRookie | Topic::MahomesInvestment
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub topic: Topic,
    pub text: String,
}

/// Inputs available to a responder.
struct Context<'a> {
    listings: &'a [Listing],
}

struct Rule {
    topic: Topic,
    matches: fn(&str) -> bool,
    respond: fn(&Context<'_>) -> Option<String>,
}

fn any_of(q: &str, words: &[&str]) -> bool {
    words.iter().any(|w| q.contains(w))
}

fn jordan(q: &str) -> bool {
    any_of(q, &["jordan", "michael"])
}

fn mahomes(q: &str) -> bool {
    any_of(q, &["mahomes", "patrick"])
}

fn buying(q: &str) -> bool {
    any_of(q, &["buy", "invest"])
}

fn fixed(text: &'static str) -> Option<String> {
    Some(text.to_string())
}

/// Rule table in priority order. Player-specific rules come first so that
/// "should I buy Mahomes" reads as a Mahomes question, not a generic buy.
const RULES: &[Rule] = &[
    Rule {
        topic: Topic::JordanSell,
        matches: |q| q.contains("sell") && q.contains("jordan"),
        respond: |_| fixed(templates::JORDAN_SELL),
    },
    Rule {
        topic: Topic::MahomesSell,
        matches: |q| q.contains("sell") && q.contains("mahomes"),
        respond: |_| fixed(templates::MAHOMES_SELL),
    },
    Rule {
        topic: Topic::JordanRookie,
        matches: |q| jordan(q) && any_of(q, &["rookie", "1986"]),
        respond: |_| fixed(templates::JORDAN_ROOKIE),
    },
    Rule {
        topic: Topic::MahomesRookie,
        matches: |q| mahomes(q) && any_of(q, &["rookie", "2017"]),
        respond: |_| fixed(templates::MAHOMES_ROOKIE),
    },
    Rule {
        topic: Topic::JordanInvestment,
        matches: |q| jordan(q) && buying(q),
        respond: |_| fixed(templates::JORDAN_INVESTMENT),
    },
    Rule {
        topic: Topic::MahomesInvestment,
        matches: |q| mahomes(q) && buying(q),
        respond: |_| fixed(templates::MAHOMES_INVESTMENT),
    },
    Rule {
        topic: Topic::Jordan,
        matches: jordan,
        respond: |_| fixed(templates::JORDAN),
    },
    Rule {
        topic: Topic::Mahomes,
        matches: mahomes,
        respond: |_| fixed(templates::MAHOMES),
    },
    Rule {
        topic: Topic::Wembanyama,
        matches: |q| any_of(q, &["wembanyama", "victor", "wemby"]),
        respond: |_| fixed(templates::WEMBANYAMA),
    },
    Rule {
        topic: Topic::Burrow,
        matches: |q| q.contains("burrow"),
        respond: |_| fixed(templates::BURROW),
    },
    Rule {
        topic: Topic::GradingDecision,
        matches: |q| any_of(q, &["worth grading", "should i grade"]),
        respond: |_| fixed(templates::GRADING_DECISION),
    },
    Rule {
        topic: Topic::GradingMasterclass,
        matches: |q| any_of(q, &["grade", "grading", "psa", "bgs"]),
        respond: |_| fixed(templates::GRADING_MASTERCLASS),
    },
    Rule {
        topic: Topic::TopOpportunities,
        matches: |q| any_of(q, &["buy", "invest", "recommend", "opportunit"]),
        respond: render_opportunities,
    },
    Rule {
        topic: Topic::InvestmentOutlook,
        matches: |q| any_of(q, &["best investment", "what should i buy", "buy", "invest"]),
        respond: |_| fixed(templates::INVESTMENT_OUTLOOK),
    },
    Rule {
        topic: Topic::SellTiming,
        matches: |q| any_of(q, &["when to sell", "timing"]),
        respond: |_| fixed(templates::SELL_TIMING),
    },
    Rule {
        topic: Topic::MarketAnalysis,
        matches: |q| any_of(q, &["market", "trend", "analysis"]),
        respond: |_| fixed(templates::MARKET_ANALYSIS),
    },
    Rule {
        topic: Topic::Portfolio,
        matches: |q| any_of(q, &["portfolio", "diversify"]),
        respond: |_| fixed(templates::PORTFOLIO),
    },
    Rule {
        topic: Topic::SellingStrategy,
        matches: |q| q.contains("sell"),
        respond: |_| fixed(templates::SELLING_STRATEGY),
    },
    Rule {
        topic: Topic::Budget,
        matches: |q| any_of(q, &["budget", "money", "afford"]),
        respond: |_| fixed(templates::BUDGET),
    },
];

/// Top three underpriced listings. Yields nothing when there are none so the
/// next rule gets a chance.
fn render_opportunities(ctx: &Context<'_>) -> Option<String> {
    let picks = top_opportunities(ctx.listings, 3);
    if picks.is_empty() {
        return None;
    }

    let mut out = String::from(templates::OPPORTUNITIES_HEADER);
    for (i, l) in picks.iter().enumerate() {
        let who = if l.player.is_empty() { "Unknown" } else { &l.player };
        let grade = if l.grade.is_empty() { "Raw" } else { &l.grade };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}. {} - {}", i + 1, who, l.title);
        let _ = writeln!(out, "   💰 Current Price: {}", format_usd(l.price));
        let _ = writeln!(out, "   📈 Market Value: {}", format_usd(l.market_value));
        let _ = writeln!(out, "   🚀 Profit Potential: +{:.1}%", l.profit_potential);
        let _ = writeln!(out, "   🏆 Grade: {grade}\n");
    }
    out.push_str(templates::OPPORTUNITIES_FOOTER);
    Some(out)
}

/// The finite set of replies an unrecognized query can produce.
pub fn fallback_responses() -> &'static [&'static str] {
    &templates::FALLBACKS
}

/// Maps a free-text query to a reply. Never fails.
///
/// Callers reject blank input before dispatch; if it reaches here anyway it
/// simply gets a fallback.
pub fn respond(query: &str, listings: &[Listing], rng: &mut SimRng) -> Reply {
    let normalized = query.to_lowercase();
    let ctx = Context { listings };

    for rule in RULES {
        if !(rule.matches)(&normalized) {
            continue;
        }
        if let Some(text) = (rule.respond)(&ctx) {
            return Reply {
                topic: rule.topic,
                text,
            };
        }
    }

    let text = rng
        .pick(fallback_responses())
        .copied()
        .unwrap_or(templates::FALLBACKS[0]);
    Reply {
        topic: Topic::Fallback,
        text: text.to_string(),
    }
}
