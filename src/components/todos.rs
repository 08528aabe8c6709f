//! Todo Components

use leptos::prelude::*;
use web_sys::SubmitEvent;

use super::ModalFrame;
use crate::context::use_app_context;
use crate::dashboard::{Action, Outcome};
use crate::store::{close_modal, open_modal, use_ui_store, Modal};
use crate::view::{format_due_date, EMPTY_TODOS};

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let todos = move || ctx.dashboard.with(|d| d.todos().to_vec());

    view! {
        <section class="widget">
            <div class="widget-header">
                <h2>"To-Do"</h2>
                <button class="btn-icon" title="Add task" on:click=move |_| open_modal(&store, Modal::Todo)>
                    <i class="fas fa-plus"></i>
                </button>
            </div>
            <div class="todos-list">
                <Show
                    when=move || ctx.dashboard.with(|d| !d.todos().is_empty())
                    fallback=|| view! { <p class="empty-state">{EMPTY_TODOS}</p> }
                >
                    // completed is part of the key so toggled rows re-render
                    <For each=todos key=|todo| (todo.id, todo.completed) let:todo>
                        <div class=if todo.completed { "todo-item completed" } else { "todo-item" }>
                            <div class="todo-left">
                                <input
                                    type="checkbox"
                                    prop:checked=todo.completed
                                    on:change=move |_| { ctx.apply(Action::ToggleTodo(todo.id)); }
                                />
                                <span class="todo-text">{todo.text.clone()}</span>
                            </div>
                            <div class="todo-right">
                                {format_due_date(&todo.due_date).map(|due| view! { <span class="todo-due">{due}</span> })}
                                <button
                                    class="btn-icon"
                                    title="Delete"
                                    on:click=move |_| { ctx.apply(Action::RemoveTodo(todo.id)); }
                                >
                                    <i class="fas fa-trash"></i>
                                </button>
                            </div>
                        </div>
                    </For>
                </Show>
            </div>
        </section>
    }
}

#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let (text, set_text) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let action = Action::AddTodo {
            text: text.get(),
            due_date: due_date.get(),
        };
        if ctx.apply(action) != Outcome::Unchanged {
            close_modal(&store);
        }
    };

    view! {
        <ModalFrame title="Add Task">
            <form on:submit=submit>
                <div class="form-group">
                    <label for="todoText">"Task"</label>
                    <input
                        id="todoText"
                        type="text"
                        required
                        prop:value=move || text.get()
                        on:input=move |ev| set_text.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="todoDueDate">"Due date (optional)"</label>
                    <input
                        id="todoDueDate"
                        type="date"
                        prop:value=move || due_date.get()
                        on:input=move |ev| set_due_date.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary">"Save"</button>
            </form>
        </ModalFrame>
    }
}
