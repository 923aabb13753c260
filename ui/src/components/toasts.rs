use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::app::use_services;
use crate::core::notice::{DismissSchedule, NOTICE_DURATION_MS};
use crate::core::timing;

/// Stack of notices raised by the controller. Each one dismisses itself
/// after [`NOTICE_DURATION_MS`] or on click.
#[component]
pub fn Toasts() -> Element {
    let services = use_services();
    let _revision = (services.revision)();
    let schedule = use_hook(|| Rc::new(RefCell::new(DismissSchedule::default())));

    let effect_services = services.clone();
    use_effect(move || {
        let _ = (effect_services.revision)();
        let due = schedule
            .borrow_mut()
            .due(&effect_services.notices().snapshot());
        for id in due {
            let services = effect_services.clone();
            spawn(async move {
                timing::sleep_ms(NOTICE_DURATION_MS).await;
                services.notices().dismiss(id);
                services.touch();
            });
        }
    });

    let notices = services.notices().snapshot();

    rsx! {
        div { class: "toasts", role: "status", aria_live: "polite",
            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: "toast {notice.kind.css_modifier()}",
                    onclick: {
                        let services = services.clone();
                        move |_| {
                            services.notices().dismiss(notice.id);
                            services.touch();
                        }
                    },
                    "{notice.message}"
                }
            }
        }
    }
}
