//! Dashboard page rendering
//!
//! Produces the single HTML page with Leptos server-side rendering: add
//! form, subscription table and the yearly total. Leptos escapes every
//! text node and attribute value, so user text never reaches the markup raw.

use leptos::*;
use serde::Deserialize;

use crate::store::{
    format_currency, parse_amount, Frequency, NewSubscription, Snapshot, StoreResult,
    Subscription,
};

/// Raw contents of the add form, exactly as submitted
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DraftForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
}

fn default_frequency() -> String {
    Frequency::Monthly.as_str().to_string()
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            frequency: default_frequency(),
        }
    }
}

impl DraftForm {
    /// Interpret the form as an `add` candidate
    ///
    /// Amount text that does not parse reads as zero and is then refused
    /// by the store.
    pub fn to_candidate(&self) -> StoreResult<NewSubscription> {
        let frequency = self.frequency.parse::<Frequency>()?;
        Ok(NewSubscription::new(
            self.name.clone(),
            parse_amount(&self.amount),
            frequency,
        ))
    }
}

/// Everything one page render needs
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub title: String,
    pub currency_symbol: String,
    pub snapshot: Snapshot,
    pub draft: DraftForm,
    /// Inline feedback for a refused add
    pub error: Option<String>,
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f3f4f6; margin: 0; padding: 3rem 1rem; color: #111827; }
main { max-width: 48rem; margin: 0 auto; }
h1 { text-align: center; font-size: 1.875rem; margin-bottom: 2rem; }
.card { background: #fff; border-radius: .5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); margin-bottom: 2rem; overflow: hidden; }
.card .body { padding: 1.5rem; }
form.add { display: flex; flex-wrap: wrap; gap: .5rem; }
form.add input, form.add select { flex: 1 1 10rem; padding: .5rem; border: 1px solid #d1d5db; border-radius: .25rem; }
form.add button { flex: 1 1 100%; background: #3b82f6; color: #fff; font-weight: bold; padding: .5rem 1rem; border: 0; border-radius: .25rem; cursor: pointer; }
.error { color: #b91c1c; margin: 0 0 1rem; }
table { width: 100%; border-collapse: collapse; text-align: left; }
th { background: #f3f4f6; }
th, td { padding: .75rem; border-bottom: 1px solid #e5e7eb; }
td form button { background: none; border: 0; color: #ef4444; cursor: pointer; }
.total { display: flex; justify-content: space-between; align-items: center; background: #f9fafb; padding: 1rem 1.5rem; }
.total strong { font-size: 1.5rem; color: #16a34a; }
"#;

/// Reload when another client changes the collection
const LIVE_SCRIPT: &str = r#"
(() => {
  const rendered = document.querySelector("main").dataset.revision;
  const scheme = location.protocol === "https:" ? "wss://" : "ws://";
  const ws = new WebSocket(scheme + location.host + "/api/v1/ws");
  ws.onmessage = (event) => {
    const msg = JSON.parse(event.data);
    if (msg.type === "snapshot" && String(msg.revision) !== rendered) location.reload();
  };
})();
"#;

/// Render the full dashboard page
pub fn render_page(page: DashboardView) -> String {
    let body = leptos::ssr::render_to_string(move || view! { <DashboardPage page=page /> });

    let mut html = String::from("<!DOCTYPE html>");
    html.push_str(&body);
    html
}

#[component]
fn DashboardPage(page: DashboardView) -> impl IntoView {
    let DashboardView {
        title,
        currency_symbol,
        snapshot,
        draft,
        error,
    } = page;
    let revision = snapshot.revision.to_string();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <title>{title.clone()}</title>
                <style inner_html=STYLE></style>
            </head>
            <body>
                <main data-revision=revision>
                    <h1>{title}</h1>
                    <AddSubscriptionForm draft=draft error=error />
                    <SubscriptionTable snapshot=snapshot currency_symbol=currency_symbol />
                </main>
                <script inner_html=LIVE_SCRIPT></script>
            </body>
        </html>
    }
}

/// Add form; keeps the draft and shows the refusal after a rejected add
#[component]
fn AddSubscriptionForm(draft: DraftForm, error: Option<String>) -> impl IntoView {
    let chosen = draft.frequency.to_lowercase();

    view! {
        <section class="card">
            <div class="body">
                <h2>"Add New Subscription"</h2>
                {error.map(|message| view! { <p class="error" role="alert">{message}</p> })}
                <form class="add" method="post" action="/subscriptions">
                    <input
                        type="text"
                        name="name"
                        placeholder="Subscription name"
                        value=draft.name
                    />
                    <input
                        type="number"
                        name="amount"
                        placeholder="Amount"
                        step="0.01"
                        min="0"
                        value=draft.amount
                    />
                    <select name="frequency">
                        {Frequency::all()
                            .iter()
                            .map(|frequency| {
                                let is_selected = chosen == frequency.as_str();
                                view! {
                                    <option value=frequency.as_str() selected=is_selected>
                                        {capitalize(frequency.as_str())}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <button type="submit">"Add Subscription"</button>
                </form>
            </div>
        </section>
    }
}

#[component]
fn SubscriptionTable(snapshot: Snapshot, currency_symbol: String) -> impl IntoView {
    let total = format_currency(snapshot.total_annual_cost, &currency_symbol);

    view! {
        <section class="card">
            <div class="body">
                <h2>"Your Subscriptions"</h2>
                <table>
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Amount"</th>
                            <th>"Frequency"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {snapshot
                            .subscriptions
                            .into_iter()
                            .map(|subscription| {
                                view! {
                                    <SubscriptionRow
                                        subscription=subscription
                                        currency_symbol=currency_symbol.clone()
                                    />
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
            <div class="total">
                <span>"Total per Year:"</span>
                <strong id="total">{total}</strong>
            </div>
        </section>
    }
}

#[component]
fn SubscriptionRow(subscription: Subscription, currency_symbol: String) -> impl IntoView {
    let amount = format_currency(subscription.amount, &currency_symbol);
    let action = format!("/subscriptions/{}/delete", subscription.id);
    let label = format!("Delete subscription {}", subscription.id);

    view! {
        <tr data-id=subscription.id.to_string()>
            <td>{subscription.name}</td>
            <td>{amount}</td>
            <td>{subscription.frequency.as_str()}</td>
            <td>
                <form method="post" action=action>
                    <button type="submit" aria-label=label>"Delete"</button>
                </form>
            </td>
        </tr>
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
