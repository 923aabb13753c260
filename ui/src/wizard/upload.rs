use api::VideoUpload;
use dioxus::prelude::*;

use crate::app::use_services;
use crate::core::session::SessionState;
use crate::t;

#[component]
pub fn UploadPanel(state: SessionState) -> Element {
    let services = use_services();
    let mut selected = use_signal(|| Option::<VideoUpload>::None);
    let mut pending = use_signal(|| false);

    let sport = state.sport.map(|s| s.label()).unwrap_or_default();
    let metric = state.metric_label().unwrap_or_default();
    let busy = pending() || state.uploading;

    let on_file = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        spawn(async move {
            match engine.read_file(&name).await {
                Some(bytes) => {
                    let video = VideoUpload::new(name, bytes);
                    tracing::debug!(file = %video.file_name, size_mb = video.size_mb(), "video chosen");
                    selected.set(Some(video));
                }
                None => {
                    tracing::warn!(file = %name, "could not read chosen file");
                    selected.set(None);
                }
            }
        });
    };

    let upload_services = services.clone();
    let on_upload = move |_| {
        let Some(video) = selected() else {
            return;
        };
        if pending() {
            return;
        }
        pending.set(true);
        let controller = upload_services.controller.clone();
        let notices = upload_services.notices().clone();
        upload_services.run(async move {
            if let Err(err) = controller.upload(video).await {
                notices.error(err.to_string());
            }
            pending.set(false);
        });
    };

    let back_services = services.clone();
    let on_back = move |_| {
        back_services.controller.start_over();
        back_services.touch();
    };

    let chosen = selected().map(|video| (video.file_name.clone(), video.size_mb()));

    rsx! {
        section { class: "wizard wizard--upload",
            h2 { {t!("wizard-upload-heading")} }
            p { class: "wizard__context", {t!("wizard-upload-hint", sport = sport, metric = metric)} }

            label { class: "upload__picker",
                input {
                    r#type: "file",
                    accept: "video/*",
                    disabled: busy,
                    onchange: on_file,
                }
            }

            if let Some((name, size_mb)) = chosen {
                p { class: "upload__file", "{name} · {size_mb:.1} MB" }
            }

            if let Some(error) = state.upload_error.as_ref() {
                p { class: "upload__error", role: "alert", "{error}" }
            }

            div { class: "wizard__actions",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy,
                    onclick: on_back,
                    {t!("wizard-start-over")}
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy || selected().is_none(),
                    onclick: on_upload,
                    if busy {
                        if let Some(video) = selected() {
                            {t!("wizard-uploading", file = video.file_name)}
                        }
                    } else {
                        {t!("wizard-upload-submit")}
                    }
                }
            }
        }
    }
}
