use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

/// The `#message` region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    pub text: String,
    pub kind: Option<BannerKind>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BannerAction {
    Show(BannerKind, String),
    Hide,
}

impl Reducible for Banner {
    type Action = BannerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            BannerAction::Show(kind, text) => Rc::new(Banner {
                text,
                kind: Some(kind),
                visible: true,
            }),
            // Hiding keeps text and kind so the region does not flash empty.
            BannerAction::Hide => Rc::new(Banner {
                visible: false,
                ..(*self).clone()
            }),
        }
    }
}

impl Banner {
    pub fn class_list(&self) -> String {
        let mut classes = Vec::with_capacity(2);
        if let Some(kind) = self.kind {
            classes.push(kind.class());
        }
        if !self.visible {
            classes.push("hidden");
        }
        classes.join(" ")
    }
}

/// One message: what to dispatch now, and what to dispatch `delay_ms` later.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerPlan {
    pub now: BannerAction,
    pub later: BannerAction,
    pub delay_ms: u32,
}

pub fn plan(hide_after_ms: u32, kind: BannerKind, text: String) -> BannerPlan {
    BannerPlan {
        now: BannerAction::Show(kind, text),
        later: BannerAction::Hide,
        delay_ms: hide_after_ms,
    }
}

/// Shows a message and schedules its hide. Timers are never cancelled, so an
/// older timer can hide a newer message early.
pub fn announce(banner: &UseReducerDispatcher<Banner>, hide_after_ms: u32, kind: BannerKind, text: String) {
    let BannerPlan { now, later, delay_ms } = plan(hide_after_ms, kind, text);
    banner.dispatch(now);
    let banner = banner.clone();
    Timeout::new(delay_ms, move || banner.dispatch(later)).forget();
}
