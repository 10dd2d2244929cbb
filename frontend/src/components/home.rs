use crate::api;
use crate::store::{Action, StoreContext, View};
use yew::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    // Load the user's personalities on mount
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            let creator_id = store.user.user_id;
            yew::platform::spawn_local(async move {
                match api::fetch_personalities(creator_id).await {
                    Ok(personalities) => store.dispatch(Action::SetPersonalities(personalities)),
                    Err(e) => tracing::error!("Failed to load personalities: {:?}", e),
                }
            });
            || {}
        });
    }

    let open_create = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::Navigate(View::Create)))
    };

    html! {
        <div class="home-page">
            <h1 class="page-title">{"Your AI Characters"}</h1>
            if store.personalities.is_empty() {
                <div class="empty-state">
                    <p>{"You haven't created any characters yet."}</p>
                    <button class="btn btn-primary" onclick={open_create}>{"Create one"}</button>
                </div>
            } else {
                <div class="personality-grid">
                    {for store.personalities.iter().map(|p| html! {
                        <div class="personality-card" key={p.key.clone()}>
                            <div class="personality-header">
                                <span class="personality-title">{p.title.clone()}</span>
                                <span class="provider-badge">{p.provider.label()}</span>
                            </div>
                            <p class="personality-desc">{p.short_description.clone()}</p>
                            <span class="field-hint">{format!("Voice: {}", p.oai_voice)}</span>
                        </div>
                    })}
                </div>
            }
        </div>
    }
}
