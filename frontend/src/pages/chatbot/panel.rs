use leptos::{ev::SubmitEvent, *};

use super::assistant;
use crate::state::resources::use_cached_resources;

#[derive(Debug, Clone, PartialEq)]
struct ChatMessage {
    from_user: bool,
    text: String,
}

#[component]
pub fn ChatbotPanel() -> impl IntoView {
    let cached = use_cached_resources();
    let resources = cached.resources;

    let (messages, set_messages) = create_signal(vec![ChatMessage {
        from_user: false,
        text: "Hi! I can answer questions about the resource hub and help you find \
               materials. What are you looking for?"
            .to_string(),
    }]);
    let (draft, set_draft) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let question = draft.get_untracked();
        if question.trim().is_empty() {
            return;
        }
        let reply = assistant::answer(&question, &resources.get_untracked());
        set_messages.update(|log| {
            log.push(ChatMessage {
                from_user: true,
                text: question,
            });
            log.push(ChatMessage {
                from_user: false,
                text: reply,
            });
        });
        set_draft.set(String::new());
    };

    view! {
        <div class="max-w-2xl mx-auto flex flex-col h-full">
            <h1 class="text-2xl font-bold mb-4">"Chatbot Assistant"</h1>
            <div class="flex-1 space-y-3 mb-4">
                <For
                    each={move || messages.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(index, _)| *index
                    children=move |(_, message): (usize, ChatMessage)| {
                        let bubble_class = if message.from_user {
                            "ml-auto bg-action-primary-bg text-action-primary-text rounded-lg px-4 py-2 max-w-[80%] whitespace-pre-wrap"
                        } else {
                            "mr-auto bg-surface-raised border rounded-lg px-4 py-2 max-w-[80%] whitespace-pre-wrap"
                        };
                        view! { <div class=bubble_class>{message.text}</div> }
                    }
                />
            </div>
            <form class="flex gap-2" on:submit=handle_submit>
                <input
                    class="flex-1 border rounded px-3 py-2"
                    placeholder="Ask a question..."
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(crate::components::forms::input_value(&ev))
                />
                <button class="btn-primary" type="submit">"Send"</button>
            </form>
        </div>
    }
}
