//! HTML for the activity cards.
//!
//! Cards are built as markup strings so that the unregister controls carry
//! their target in `data-*` attributes and a single delegated click handler on
//! the list can serve every card. Every interpolated string goes through
//! [`escape_html`].

use crate::model::{Activity, ActivityMap};

pub const LOADING: &str = "Loading activities...";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const DELETE_CLASS: &str = "delete-participant";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn activity_card(activity: &Activity) -> String {
    let name = escape_html(&activity.name);
    let mut card = String::new();
    card.push_str(r#"<div class="activity-card">"#);
    card.push_str(&format!(
        "<h4>{name}</h4><p>{}</p><p><strong>Schedule:</strong> {}</p>\
         <p><strong>Availability:</strong> {} spots left</p>",
        escape_html(&activity.description),
        escape_html(&activity.schedule),
        activity.spots_left(),
    ));
    card.push_str(r#"<div class="participants"><h5>Participants</h5>"#);
    if activity.participants.is_empty() {
        card.push_str(&format!(r#"<p class="no-participants">{NO_PARTICIPANTS}</p>"#));
    } else {
        card.push_str("<ul>");
        for participant in &activity.participants {
            let email = escape_html(participant);
            card.push_str(&format!(
                r#"<li><span class="participant-email">{email}</span><button type="button" class="{DELETE_CLASS}" data-email="{email}" data-activity="{name}" title="Unregister" aria-label="Unregister {email}">🗑️</button></li>"#
            ));
        }
        card.push_str("</ul>");
    }
    card.push_str("</div></div>");
    card
}

pub fn activity_cards(activities: &ActivityMap) -> String {
    activities.iter().map(activity_card).collect()
}
