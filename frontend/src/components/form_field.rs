use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    /// Renders a textarea with this many rows; a single-line input otherwise.
    #[prop_or_default]
    pub rows: Option<u32>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub max_len: usize,
    #[prop_or_default]
    pub required: bool,
    pub oninput: Callback<String>,
    pub onblur: Callback<()>,
}

/// Labelled text input with an inline error and a `used/max` counter.
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let oninput = {
        let cb = props.oninput.clone();
        let multiline = props.rows.is_some();
        Callback::from(move |e: InputEvent| {
            let value = if multiline {
                let i: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                i.value()
            } else {
                let i: web_sys::HtmlInputElement = e.target_unchecked_into();
                i.value()
            };
            cb.emit(value);
        })
    };
    let onblur = {
        let cb = props.onblur.clone();
        Callback::from(move |_: FocusEvent| cb.emit(()))
    };

    let hint_class = if props.error.is_some() {
        "field-error"
    } else {
        "field-hint"
    };
    let used = props.value.chars().count();

    html! {
        <div class="form-group">
            <label class="form-label" for={props.id.clone()}>{props.label.clone()}</label>
            if let Some(rows) = props.rows {
                <textarea class="form-textarea" id={props.id.clone()} rows={rows.to_string()}
                    placeholder={props.placeholder.clone()} value={props.value.clone()}
                    required={props.required} {oninput} {onblur} />
            } else {
                <input class="form-input" type="text" id={props.id.clone()}
                    placeholder={props.placeholder.clone()} value={props.value.clone()}
                    required={props.required} {oninput} {onblur} />
            }
            <p class="form-meta">
                <span class={hint_class}>{props.error.clone().unwrap_or_default()}</span>
                if props.max_len > 0 {
                    <span class="field-hint">{format!("{}/{}", used, props.max_len)}</span>
                }
            </p>
        </div>
    }
}
