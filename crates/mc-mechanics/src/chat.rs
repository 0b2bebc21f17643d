//! Chat messages for rolls, spell and talent cards, and rests.
//!
//! Content is an HTML fragment. Every piece of user-provided text (names,
//! descriptions, benefits, formulas) is escaped before it is embedded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mc_core::item::{SpellData, TalentData};
use mc_core::{Actor, Item};

use crate::actions::{RestKind, RollRequest};
use crate::dice::RollOutcome;

/// What a chat message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A dice roll with its outcome attached.
    Roll,
    /// Anything else: cards, rest notices.
    #[default]
    Other,
}

/// A message posted to the chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Name of the speaking actor.
    pub speaker: String,
    /// Short label shown above the content.
    pub flavor: String,
    /// HTML content.
    pub content: String,
    /// Roll or other.
    pub kind: MessageKind,
    /// The roll outcome, for roll messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<RollOutcome>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a non-roll message.
    pub fn new(
        speaker: impl Into<String>,
        flavor: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            flavor: flavor.into(),
            content: content.into(),
            kind: MessageKind::Other,
            roll: None,
            timestamp: Utc::now(),
        }
    }

    /// Returns true for roll messages.
    pub fn is_roll(&self) -> bool {
        self.kind == MessageKind::Roll
    }
}

/// Render a modifier with its sign: `+3`, `0`, `-1`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier > 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

/// Escape text for embedding in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A roll message: the evaluated formula, each die, and the total.
///
/// Dropped dice are rendered with the `dropped` class.
pub fn roll_message(speaker: &str, request: &RollRequest, outcome: &RollOutcome) -> ChatMessage {
    let mut content = String::from("<div class=\"dice-roll\">");
    content.push_str(&format!(
        "<div class=\"dice-formula\">{}</div><ol class=\"dice-rolls\">",
        escape_html(&outcome.formula)
    ));
    for die in &outcome.dice {
        let class = if die.dropped { "roll die dropped" } else { "roll die" };
        content.push_str(&format!(
            "<li class=\"{class} d{}\">{}</li>",
            die.sides, die.value
        ));
    }
    content.push_str(&format!(
        "</ol><h4 class=\"dice-total\">{}</h4></div>",
        outcome.total
    ));

    ChatMessage {
        kind: MessageKind::Roll,
        roll: Some(outcome.clone()),
        ..ChatMessage::new(speaker, request.flavor.as_str(), content)
    }
}

/// The card posted when a spell is cast.
///
/// `spell_point_cost` is `None` for casters without a spell point pool.
pub fn spell_card(
    actor: &Actor,
    item: &Item,
    spell: &SpellData,
    action_cost: u32,
    spell_point_cost: Option<u32>,
) -> ChatMessage {
    let mut content = String::from("<div class=\"mythcraft spell-card\">");
    content.push_str(&format!(
        "<header><h3>{}</h3><span class=\"spell-meta\">{} &middot; level {}</span></header>",
        escape_html(&item.name),
        spell.magic_source,
        spell.level
    ));
    content.push_str(&format!("<p class=\"spell-cost\">AP {action_cost}"));
    if let Some(sp) = spell_point_cost {
        content.push_str(&format!(" &middot; SP {sp}"));
    }
    content.push_str("</p>");
    if !item.description.is_empty() {
        content.push_str(&format!(
            "<div class=\"card-description\">{}</div>",
            escape_html(&item.description)
        ));
    }
    if !spell.damage.is_empty() {
        content.push_str("<ul class=\"card-damage\">");
        for part in &spell.damage {
            content.push_str(&format!(
                "<li>{} <span class=\"damage-type\">{}</span></li>",
                escape_html(&part.formula),
                escape_html(part.damage_type.as_str())
            ));
        }
        content.push_str("</ul>");
    }
    content.push_str("</div>");

    ChatMessage::new(&actor.name, format!("Casts {}", item.name), content)
}

/// The card posted when a talent is used.
pub fn talent_card(actor: &Actor, item: &Item, talent: &TalentData) -> ChatMessage {
    let mut content = String::from("<div class=\"mythcraft talent-card\">");
    content.push_str(&format!(
        "<header><h3>{}</h3><span class=\"talent-type\">{}</span></header>",
        escape_html(&item.name),
        talent.talent_type
    ));
    if !item.description.is_empty() {
        content.push_str(&format!(
            "<div class=\"card-description\">{}</div>",
            escape_html(&item.description)
        ));
    }
    if !talent.benefits.is_empty() {
        content.push_str("<ul class=\"talent-benefits\">");
        for benefit in &talent.benefits {
            content.push_str(&format!("<li>{}</li>", escape_html(benefit)));
        }
        content.push_str("</ul>");
    }
    content.push_str("</div>");

    ChatMessage::new(&actor.name, format!("Uses {}", item.name), content)
}

/// The notice posted after a rest, listing restored resources.
pub fn rest_message(actor: &Actor, kind: RestKind) -> ChatMessage {
    let name = escape_html(&actor.name);
    let content = match kind {
        RestKind::Short => format!(
            "<p>{name} takes a short rest.</p><p>Action points restored to {}.</p>",
            actor.action_points
        ),
        RestKind::Long => format!(
            "<p>{name} takes a long rest.</p>\
             <p>Health restored to {}.</p><p>Action points restored to {}.</p>",
            actor.health, actor.action_points
        ),
    };
    ChatMessage::new(&actor.name, kind.label(), content)
}
