use crate::store::{Action, StoreContext, Toast};
use gloo_timers::callback::Timeout;
use shared::models::NotificationVariant;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let id = props.toast.id;

    {
        let store = store.clone();
        let duration = props.toast.notification.duration_ms;
        use_effect_with(id, move |_| {
            let timeout = Timeout::new(duration, move || store.dispatch(Action::DismissToast(id)));
            move || drop(timeout)
        });
    }

    let on_dismiss = Callback::from(move |_: MouseEvent| store.dispatch(Action::DismissToast(id)));
    let n = &props.toast.notification;
    let class = match n.variant {
        NotificationVariant::Default => "toast",
        NotificationVariant::Destructive => "toast toast-destructive",
    };

    html! {
        <div {class} onclick={on_dismiss} role="status">
            if let Some(title) = &n.title {
                <div class="toast-title">{title.clone()}</div>
            }
            <div class="toast-description">{n.description.clone()}</div>
        </div>
    }
}

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    html! {
        <div class="toaster">
            {for store.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} />
            })}
        </div>
    }
}
