use crate::api::ApiClient;
use crate::components::agent_modal::AgentModal;
use crate::components::form_field::FormField;
use crate::preview::WebPreview;
use crate::store::{StoreContext, apply_outcome};
use shared::forms::{CharacterForm, PersonalityCreator, Step};
use shared::models::ModelProvider;
use shared::preview::PreviewSignal;
use shared::validation::Field;
use shared::voices::{self, EMOTIONS, PITCH_MAX, PITCH_MIN, PITCH_PRESETS, PITCH_STEP};
use yew::prelude::*;

#[function_component(CreateCharacter)]
pub fn create_character() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let redraw = use_force_update();
    let show_agent_modal = use_state(|| false);

    // Preview completion arrives from audio/timer callbacks outside the render cycle.
    // Several may land between renders, so they queue up and drain in order.
    let pending = use_mut_ref(Vec::<PreviewSignal>::new);
    let form = {
        let pending = pending.clone();
        let redraw = redraw.clone();
        use_mut_ref(move || {
            CharacterForm::new(WebPreview::new(Callback::from(move |signal| {
                pending.borrow_mut().push(signal);
                redraw.force_update();
            })))
        })
    };

    {
        let form = form.clone();
        let redraw = redraw.clone();
        use_effect(move || {
            let signals = std::mem::take(&mut *pending.borrow_mut());
            if !signals.is_empty() {
                let cleared = form.borrow_mut().preview_signals(signals);
                if cleared {
                    redraw.force_update();
                }
            }
            || ()
        });
    }

    // Silence any running preview when leaving the page.
    {
        let form = form.clone();
        use_effect_with((), move |_| move || form.borrow_mut().stop_preview());
    }

    let on_input = {
        let form = form.clone();
        let redraw = redraw.clone();
        move |field: Field| {
            let form = form.clone();
            let redraw = redraw.clone();
            Callback::from(move |value: String| {
                form.borrow_mut().set_field(field, value);
                redraw.force_update();
            })
        }
    };

    let on_blur = {
        let form = form.clone();
        let redraw = redraw.clone();
        move |field: Field| {
            let form = form.clone();
            let redraw = redraw.clone();
            Callback::from(move |_: ()| {
                form.borrow_mut().blur(field);
                redraw.force_update();
            })
        }
    };

    let on_select_voice = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |voice_id: &'static str| {
            if let Some(voice) = voices::find_voice(voice_id) {
                form.borrow_mut().select_voice(voice);
                redraw.force_update();
            }
        })
    };

    let on_pitch = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            form.borrow_mut()
                .set_voice_characteristic(Field::PitchFactor, input.value());
            redraw.force_update();
        })
    };

    let on_emotion = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |emotion: &'static str| {
            form.borrow_mut()
                .set_voice_characteristic(Field::Emotion, emotion);
            redraw.force_update();
        })
    };

    let on_advance = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            form.borrow_mut().advance();
            redraw.force_update();
        })
    };

    let on_retreat = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            form.borrow_mut().retreat();
            redraw.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let redraw = redraw.clone();
        let store = store.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let request = form.borrow_mut().begin_submit(&store.user);
            redraw.force_update();
            let Ok(request) = request else {
                return;
            };

            let form = form.clone();
            let redraw = redraw.clone();
            let store = store.clone();
            yew::platform::spawn_local(async move {
                let result = ApiClient.create_personality(request).await;
                let outcome = form.borrow_mut().finish_submit(result);
                redraw.force_update();
                apply_outcome(&store, outcome);
            });
        })
    };

    let open_agent_modal = {
        let show_agent_modal = show_agent_modal.clone();
        Callback::from(move |_: MouseEvent| show_agent_modal.set(true))
    };
    let close_agent_modal = {
        let show_agent_modal = show_agent_modal.clone();
        Callback::from(move |_: ()| show_agent_modal.set(false))
    };

    let f = form.borrow();
    let draft = f.draft();
    let errors = f.errors();
    let error = |field: Field| errors.get(field).map(|m| AttrValue::from(m.to_string()));

    let personality_step = html! {
        <div class="wizard-step">
            <div class="form-group">
                <label class="form-label">{"Pick a voice"}</label>
                <p class="field-hint">{"Click a voice to preview how it sounds."}</p>
                <div class="voice-strip">
                    {for voices::all_voices().map(|voice| {
                        let selected = draft.voice == voice.id;
                        let previewing = f.previewing() == Some(voice.id);
                        let onclick = {
                            let cb = on_select_voice.clone();
                            let id = voice.id;
                            Callback::from(move |_: MouseEvent| cb.emit(id))
                        };
                        let badge = match voice.provider {
                            ModelProvider::OpenAi => "provider-badge openai",
                            _ => "provider-badge gemini",
                        };
                        html! {
                            <div key={voice.id}
                                class={classes!("voice-card", voice.color, selected.then_some("selected"))}
                                {onclick}>
                                <div class="voice-emoji">{voice.emoji}</div>
                                <span class="voice-name">{voice.name}</span>
                                <span class="voice-desc">{voice.description}</span>
                                <span class={badge}>{voice.provider.label()}</span>
                                if previewing {
                                    <span class="voice-playing" title="Playing preview">{"🔊"}</span>
                                }
                                if selected {
                                    <span class="voice-check">{"✓"}</span>
                                }
                            </div>
                        }
                    })}
                </div>
                <span class="field-error">{errors.get(Field::Voice).unwrap_or_default().to_string()}</span>
            </div>

            <div class="elevenlabs-banner">
                <div>
                    <label class="form-label">{"Creating an Eleven Labs Character?"}</label>
                    <p class="field-hint">{"Create an ElevenLabs character with custom voice agents"}</p>
                </div>
                <button type="button" class="btn btn-secondary btn-sm" onclick={open_agent_modal}>
                    {"+ ElevenLabs"}
                </button>
            </div>

            <FormField id="title" label="Title" placeholder="AI Hulk"
                value={draft.title.clone()} error={error(Field::Title)}
                max_len={Field::Title.max_len().unwrap_or_default()}
                oninput={on_input(Field::Title)} onblur={on_blur(Field::Title)} />
            <FormField id="description" label="Description" rows={2}
                placeholder="Describe what your AI character does and its personality..."
                value={draft.description.clone()} error={error(Field::Description)}
                max_len={Field::Description.max_len().unwrap_or_default()}
                oninput={on_input(Field::Description)} onblur={on_blur(Field::Description)} />
            <FormField id="prompt" label="Prompt" rows={4}
                placeholder="Enter specific instructions for how your AI should respond..."
                value={draft.prompt.clone()} error={error(Field::Prompt)}
                max_len={Field::Prompt.max_len().unwrap_or_default()}
                oninput={on_input(Field::Prompt)} onblur={on_blur(Field::Prompt)} />
            <FormField id="firstMessagePrompt" label="First message prompt" rows={4}
                placeholder="How your AI character should respond in the first message to the user..."
                value={draft.first_message_prompt.clone()} error={error(Field::FirstMessagePrompt)}
                max_len={Field::FirstMessagePrompt.max_len().unwrap_or_default()}
                oninput={on_input(Field::FirstMessagePrompt)}
                onblur={on_blur(Field::FirstMessagePrompt)} />

            <div class="form-actions">
                <button class="btn btn-primary" onclick={on_advance}>{"Voice Features →"}</button>
            </div>
        </div>
    };

    let vc = &draft.voice_characteristics;
    let voice_step = html! {
        <div class="wizard-step">
            <div class="form-group">
                <label class="form-label" for="pitchFactor">{"Voice Pitch"}</label>
                <p class="field-hint">{"Slide to adjust voice depth on your device"}</p>
                <input id="pitchFactor" class="form-range" type="range"
                    min={PITCH_MIN.to_string()} max={PITCH_MAX.to_string()}
                    step={PITCH_STEP.to_string()}
                    value={vc.pitch_factor.to_string()}
                    oninput={on_pitch} />
                <div class="pitch-presets">
                    {for PITCH_PRESETS.iter().map(|p| html! {
                        <div class="pitch-preset">
                            <span>{p.emoji}</span>
                            <span class="pitch-label">{p.label}</span>
                            <span class="field-hint">{p.desc}</span>
                        </div>
                    })}
                </div>
                <span class="field-error">{errors.get(Field::PitchFactor).unwrap_or_default().to_string()}</span>
            </div>

            <FormField id="voiceCharacteristics" label="Characteristics" rows={2}
                placeholder="e.g., Medium pitch, Normal speed, Clear voice"
                value={vc.features.clone()} error={error(Field::Features)}
                max_len={Field::Features.max_len().unwrap_or_default()}
                oninput={on_input(Field::Features)} onblur={on_blur(Field::Features)} />

            <div class="form-group">
                <label class="form-label">{"Emotional Tone"}</label>
                <div class="emotion-grid">
                    {for EMOTIONS.iter().map(|emotion| {
                        let onclick = {
                            let cb = on_emotion.clone();
                            let value = emotion.value;
                            Callback::from(move |_: MouseEvent| cb.emit(value))
                        };
                        let selected = vc.emotion == emotion.value;
                        html! {
                            <div key={emotion.value}
                                class={classes!("emotion-card", selected.then_some(emotion.color), selected.then_some("selected"))}
                                {onclick}>
                                <span>{emotion.icon}</span>
                                <span class="emotion-label">{emotion.label}</span>
                            </div>
                        }
                    })}
                </div>
                <span class="field-error">{errors.get(Field::Emotion).unwrap_or_default().to_string()}</span>
            </div>

            <div class="form-actions split">
                <button class="btn btn-secondary" onclick={on_retreat}>{"← Back"}</button>
                <button class="btn btn-primary" disabled={!f.can_submit()} onclick={on_submit}>
                    {if f.is_submitting() { "Creating..." } else { "Create ✓" }}
                </button>
            </div>
        </div>
    };

    html! {
        <div class="create-page">
            <h1 class="page-title">{"Create your AI Character"}</h1>
            <form class="wizard" onsubmit={|e: SubmitEvent| e.prevent_default()}>
                {match f.step() {
                    Step::Personality => personality_step,
                    Step::Voice => voice_step,
                }}
            </form>
            <AgentModal is_open={*show_agent_modal}
                on_close={close_agent_modal.clone()}
                on_success={Some(close_agent_modal)} />
        </div>
    }
}
