//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Identity Check-in"</h1>
            <p class="subtitle">
                "Upload the front and back of your identity document. "
                "The details are read automatically and you receive a check-in ID."
            </p>
        </div>
    }
}
