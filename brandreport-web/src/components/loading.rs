use crate::config::FrontendConfig;
use gloo_timers::callback::{Interval, Timeout};
use i18nrs::yew::use_translation;
use yew::{Html, function_component, html, use_effect_with, use_state};

const PROGRESS_TICK_MS: u32 = 200;
const MAX_PROGRESS_STEP: f64 = 15.0;

/// Status text shown before the first step fires.
const INITIAL_STATUS: &str = "loading.status.loading";

/// Status text keys and the delay after mount at which each appears.
const STATUS_STEPS: [(u32, &str); 3] = [
    (800, "loading.status.initializing"),
    (1600, "loading.status.setting_up"),
    (2400, "loading.status.almost_ready"),
];

/// Next progress value, capped at 100.
pub(crate) fn advance_progress(current: f64, step: f64) -> f64 {
    (current + step.max(0.0)).min(100.0)
}

/// Full-screen splash shown while the session is being restored.
#[function_component(LoadingScreen)]
pub fn loading_screen() -> Html {
    let (i18n, ..) = use_translation();
    let progress = use_state(|| 0.0_f64);
    let status_key = use_state(|| INITIAL_STATUS);

    {
        let progress = progress.clone();
        let status_key = status_key.clone();
        use_effect_with((), move |_| {
            let mut current = 0.0;
            let interval = Interval::new(PROGRESS_TICK_MS, move || {
                current = advance_progress(current, js_sys::Math::random() * MAX_PROGRESS_STEP);
                progress.set(current);
            });
            let steps: Vec<Timeout> = STATUS_STEPS
                .iter()
                .map(|&(delay, key)| {
                    let status_key = status_key.clone();
                    Timeout::new(delay, move || status_key.set(key))
                })
                .collect();

            // Dropping the handles cancels anything still pending.
            move || {
                drop(interval);
                drop(steps);
            }
        });
    }

    let config = FrontendConfig::new();
    let app_name = config.app_name().to_string();
    let initial = app_name.chars().next().unwrap_or('?').to_string();
    let percent = progress.round();

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-base-100">
            <div class="flex flex-col items-center gap-8 text-center">
                <div class="relative">
                    <div class="absolute inset-0 animate-ping h-16 w-16 rounded-2xl bg-primary opacity-75"></div>
                    <div class="relative h-16 w-16 rounded-2xl bg-primary flex items-center justify-center">
                        <span class="text-primary-content font-bold text-xl">{ initial }</span>
                    </div>
                </div>
                <div class="space-y-2">
                    <h1 class="text-2xl font-bold">{ app_name }</h1>
                    <p class="text-base-content/70 animate-pulse">{ i18n.t(*status_key) }</p>
                </div>
                <progress class="progress progress-primary w-64" value={percent.to_string()} max="100"></progress>
            </div>
        </div>
    }
}
