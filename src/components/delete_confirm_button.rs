//! Delete Confirm Button Component
//!
//! Inline delete confirmation used for folders and custom feeds.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a trash button initially. When clicked, shows the prompt with ✓/✗
/// buttons; only ✓ runs `on_confirm`.
///
/// # Arguments
/// * `prompt` - Question shown while confirming (e.g. "Delete folder?")
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <Show when=move || !confirming.get()>
            <button
                class="btn-icon"
                title="Delete"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                <i class="fas fa-trash"></i>
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
