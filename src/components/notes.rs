//! Notes Components

use leptos::prelude::*;
use web_sys::SubmitEvent;

use super::ModalFrame;
use crate::context::use_app_context;
use crate::dashboard::{Action, Outcome};
use crate::store::{close_modal, open_modal, use_ui_store, Modal};
use crate::view::{note_lines, EMPTY_NOTES};

#[component]
pub fn NotesList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let notes = move || ctx.dashboard.with(|d| d.notes().to_vec());

    view! {
        <section class="widget">
            <div class="widget-header">
                <h2>"Notes"</h2>
                <button class="btn-icon" title="Add note" on:click=move |_| open_modal(&store, Modal::Note)>
                    <i class="fas fa-plus"></i>
                </button>
            </div>
            <div class="notes-list">
                <Show
                    when=move || ctx.dashboard.with(|d| !d.notes().is_empty())
                    fallback=|| view! { <p class="empty-state">{EMPTY_NOTES}</p> }
                >
                    <For each=notes key=|note| note.id let:note>
                        <div class="note-item">
                            <div class="note-header">
                                <div class="note-title">{note.title.clone()}</div>
                                <button
                                    class="btn-icon"
                                    title="Delete"
                                    on:click=move |_| { ctx.apply(Action::RemoveNote(note.id)); }
                                >
                                    <i class="fas fa-trash"></i>
                                </button>
                            </div>
                            <div class="note-content">
                                {note_lines(&note.content)
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, line)| view! {
                                        {(i > 0).then(|| view! { <br /> })}
                                        {line}
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    </For>
                </Show>
            </div>
        </section>
    }
}

#[component]
pub fn NoteForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let action = Action::AddNote {
            title: title.get(),
            content: content.get(),
        };
        if ctx.apply(action) != Outcome::Unchanged {
            close_modal(&store);
        }
    };

    view! {
        <ModalFrame title="Add Note">
            <form on:submit=submit>
                <div class="form-group">
                    <label for="noteTitle">"Title"</label>
                    <input
                        id="noteTitle"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="noteContent">"Content"</label>
                    <textarea
                        id="noteContent"
                        rows="5"
                        prop:value=move || content.get()
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
            </form>
        </ModalFrame>
    }
}
