use breath_pacer::scheduler::AnimationFrameScheduler;
use breath_pacer::{BreathingEngine, ButtonState, PacerError, Phase, PresentationSink, Snapshot};
use log::error;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Raw text of an input field plus the callback that keeps it current.
#[derive(Clone)]
pub struct InputField {
    /// Exactly what the user typed; parsing happens when the engine reads it.
    pub text: String,
    /// Callback for the input's `oninput` event.
    pub on_input: Callback<InputEvent>,
}

/// Custom hook tracking the text of one input field.
#[hook]
pub fn use_input_field(initial_value: String) -> InputField {
    let text = use_state(move || initial_value);

    let on_input = {
        let text_setter = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    InputField {
        text: (*text).clone(),
        on_input,
    }
}

/// What the page currently shows, as last reported by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PacerView {
    pub snapshot: Option<Snapshot>,
    pub buttons: ButtonState,
    /// Leg the circle was last drawn in; a paused circle keeps its color.
    pub last_leg: Phase,
}

pub enum PacerAction {
    Show(Snapshot),
    Buttons(ButtonState),
}

impl Reducible for PacerView {
    type Action = PacerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PacerAction::Show(snapshot) => {
                if snapshot.phase != Phase::Paused {
                    next.last_leg = snapshot.phase;
                }
                next.snapshot = Some(snapshot);
            }
            PacerAction::Buttons(buttons) => next.buttons = buttons,
        }
        Rc::new(next)
    }
}

/// Presentation sink feeding the view reducer; validation errors get a
/// blocking alert like the rest of the page's prompts.
pub struct ViewSink {
    dispatcher: UseReducerDispatcher<PacerView>,
}

impl PresentationSink for ViewSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.dispatcher.dispatch(PacerAction::Show(*snapshot));
    }

    fn on_validation_error(&mut self, error: PacerError) {
        if let Err(err) = gloo_utils::window().alert_with_message(&error.to_string()) {
            error!("Failed to show validation alert: {:?}", err);
        }
    }

    fn on_button_state_change(&mut self, buttons: ButtonState) {
        self.dispatcher.dispatch(PacerAction::Buttons(buttons));
    }
}

pub type WebEngine = BreathingEngine<AnimationFrameScheduler, ViewSink>;

/// Custom hook owning the engine for the lifetime of the component.
///
/// The frame closure only holds a weak reference, so dropping the component
/// drops the engine, which cancels any outstanding frame.
#[hook]
pub fn use_pacer() -> (UseReducerHandle<PacerView>, Rc<RefCell<WebEngine>>) {
    let view = use_reducer(PacerView::default);
    let dispatcher = view.dispatcher();

    let engine = use_state(move || {
        Rc::new_cyclic(|weak: &Weak<RefCell<WebEngine>>| {
            let weak = weak.clone();
            let scheduler = AnimationFrameScheduler::new(move |timestamp| {
                if let Some(engine) = weak.upgrade() {
                    match engine.try_borrow_mut() {
                        Ok(mut engine) => engine.on_tick(timestamp),
                        Err(_) => error!("Frame arrived while the engine was busy"),
                    }
                }
            });
            RefCell::new(BreathingEngine::new(scheduler, ViewSink { dispatcher }))
        })
    });

    (view, (*engine).clone())
}
