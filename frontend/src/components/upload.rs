//! Front/back document upload form.
//!
//! Renders the two file inputs, their status labels and the submit button
//! under the fixed element ids, and binds them to an [`UploadWidget`].

use std::rc::Rc;

use leptos::*;
use web_sys::File;

use crate::config::{
    BACK_INFO_ID, BACK_INPUT_ID, FRONT_INFO_ID, FRONT_INPUT_ID, NO_FILE_LABEL, SUBMIT_BUTTON_ID,
    SUBMIT_LABEL,
};
use crate::services::{AlertNotifier, FetchTransport};
use crate::types::SelectedFile;
use crate::widget::{FileSlot, Side, StatusLabel, SubmitControl, UploadWidget};

/// A file input reached through its node ref.
#[derive(Clone, Copy)]
pub struct InputSlot(pub NodeRef<html::Input>);

impl FileSlot for InputSlot {
    type Blob = File;

    fn selected(&self) -> Option<SelectedFile<File>> {
        let input = self.0.get_untracked()?;
        let file = input.files()?.get(0)?;
        Some(SelectedFile::new(file.name(), file.size() as u64, file))
    }
}

/// A status label backed by a signal.
#[derive(Clone, Copy)]
pub struct SignalLabel(pub WriteSignal<String>);

impl StatusLabel for SignalLabel {
    fn set_text(&self, text: &str) {
        self.0.set(text.to_string());
    }
}

/// Submit button state backed by two signals.
#[derive(Clone, Copy)]
pub struct SignalButton {
    pub enabled: WriteSignal<bool>,
    pub label: WriteSignal<String>,
}

impl SubmitControl for SignalButton {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn set_label(&self, label: &str) {
        self.label.set(label.to_string());
    }
}

#[component]
pub fn CheckInForm() -> impl IntoView {
    let (front_info, set_front_info) = create_signal(NO_FILE_LABEL.to_string());
    let (back_info, set_back_info) = create_signal(NO_FILE_LABEL.to_string());
    let (submit_enabled, set_submit_enabled) = create_signal(true);
    let (submit_label, set_submit_label) = create_signal(SUBMIT_LABEL.to_string());

    let front_input = create_node_ref::<html::Input>();
    let back_input = create_node_ref::<html::Input>();

    let widget = Rc::new(UploadWidget::new(
        Side::new(InputSlot(front_input), SignalLabel(set_front_info)),
        Side::new(InputSlot(back_input), SignalLabel(set_back_info)),
        SignalButton {
            enabled: set_submit_enabled,
            label: set_submit_label,
        },
        AlertNotifier,
        FetchTransport,
    ));

    let on_front_change = {
        let widget = Rc::clone(&widget);
        move |_| widget.front_changed()
    };

    let on_back_change = {
        let widget = Rc::clone(&widget);
        move |_| widget.back_changed()
    };

    let on_submit = move |_| {
        log::info!("Submit button clicked");
        let widget = Rc::clone(&widget);
        spawn_local(async move {
            let state = widget.submit().await;
            log::debug!("Submission finished: {:?}", state);
        });
    };

    view! {
        <div class="upload-card">
            <div class="upload-field">
                <label for=FRONT_INPUT_ID class="upload-label">"Front side"</label>
                <input
                    type="file"
                    id=FRONT_INPUT_ID
                    accept="image/*"
                    node_ref=front_input
                    on:change=on_front_change
                />
                <p id=FRONT_INFO_ID class="file-info">{move || front_info.get()}</p>
            </div>

            <div class="upload-field">
                <label for=BACK_INPUT_ID class="upload-label">"Back side"</label>
                <input
                    type="file"
                    id=BACK_INPUT_ID
                    accept="image/*"
                    node_ref=back_input
                    on:change=on_back_change
                />
                <p id=BACK_INFO_ID class="file-info">{move || back_info.get()}</p>
            </div>

            <button
                id=SUBMIT_BUTTON_ID
                class="upload-button"
                disabled=move || !submit_enabled.get()
                on:click=on_submit
            >
                {move || submit_label.get()}
            </button>
        </div>
    }
}
