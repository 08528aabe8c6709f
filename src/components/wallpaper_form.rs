//! Wallpaper Form Component
//!
//! The url is validated by loading it into a preview image; "Set" stays
//! disabled until the image has loaded.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::SubmitEvent;

use super::ModalFrame;
use crate::config::DebounceConfig;
use crate::context::use_app_context;
use crate::dashboard::Action;
use crate::preview::{settle, PreviewGate, WallpaperPreview};
use crate::store::{close_modal, use_ui_store};

#[component]
pub fn WallpaperForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let debounce = DebounceConfig::default();

    let (url, set_url) = signal(String::new());
    let (preview_src, set_preview_src) = signal(String::new());
    let (state, set_state) = signal(WallpaperPreview::Hidden);

    let gate = PreviewGate::new();
    on_cleanup({
        let gate = gate.clone();
        move || gate.invalidate()
    });

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        set_url.set(value.clone());
        set_state.set(WallpaperPreview::Hidden);

        let ticket = gate.begin();
        let gate = gate.clone();
        spawn_local(async move {
            let value = value.trim().to_string();
            if !settle(&gate, ticket, debounce.wallpaper_preview_ms).await || value.is_empty() {
                return;
            }
            set_preview_src.set(value);
            set_state.set(WallpaperPreview::Loading);
        });
    };

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.get().can_apply() {
            ctx.apply(Action::SetWallpaper(url.get()));
        }
        close_modal(&store);
    };

    let clear = move |_| {
        ctx.apply(Action::ClearWallpaper);
        close_modal(&store);
    };

    view! {
        <ModalFrame title="Wallpaper">
            <form on:submit=submit>
                <div class="form-group">
                    <label for="wallpaperUrlInput">"Image URL"</label>
                    <input
                        id="wallpaperUrlInput"
                        type="url"
                        placeholder="https://..."
                        prop:value=move || url.get()
                        on:input=on_input
                    />
                </div>
                <Show when=move || state.get().is_visible()>
                    <div class="wallpaper-preview">
                        <img
                            src=move || preview_src.get()
                            alt="Wallpaper preview"
                            on:load=move |_| {
                                if state.get_untracked() == WallpaperPreview::Loading {
                                    set_state.set(WallpaperPreview::Ready);
                                }
                            }
                            on:error=move |_| {
                                if state.get_untracked() != WallpaperPreview::Hidden {
                                    set_state.set(WallpaperPreview::Failed);
                                }
                            }
                        />
                        <div class="wallpaper-preview-msg">{move || state.get().message()}</div>
                    </div>
                </Show>
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" prop:disabled=move || !state.get().can_apply()>
                        "Set"
                    </button>
                    <button type="button" class="btn" on:click=clear>"Clear Wallpaper"</button>
                </div>
            </form>
        </ModalFrame>
    }
}
