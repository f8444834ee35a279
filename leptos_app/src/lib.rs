pub mod api;
pub mod item;
pub mod state;

use leptos::*;
use wasm_bindgen_futures::spawn_local;

use api::ItemsApi;
use item::Item;
use state::{ItemsState, ListSnapshot};

/// Loading flag and items, changing only when either of them differs.
pub fn list_memo(state: RwSignal<ItemsState>) -> Memo<ListSnapshot> {
    create_memo(move |_| state.with(|s| s.list_snapshot()))
}

#[component]
pub fn App() -> impl IntoView {
    let state = create_rw_signal(ItemsState::default());
    let api = store_value(ItemsApi::same_origin());
    let list = list_memo(state);
    let error = create_memo(move |_| state.with(|s| s.error.clone()));

    let fetch_items = move || {
        state.update(|s| s.begin_fetch());
        let api = api.get_value();
        spawn_local(async move {
            let result = api.list_items().await;
            state.update(|s| s.finish_fetch(result));
        });
    };

    // initial load
    fetch_items();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let request = state.with_untracked(|s| s.form.to_request());
        let api = api.get_value();
        spawn_local(async move {
            let result = api.create_item(&request).await;
            if state.try_update(|s| s.finish_create(result)).unwrap_or(false) {
                fetch_items();
            }
        });
    };

    let on_delete = Callback::new(move |id: String| {
        let api = api.get_value();
        spawn_local(async move {
            let result = api.delete_item(&id).await;
            if state.try_update(|s| s.finish_delete(result)).unwrap_or(false) {
                fetch_items();
            }
        });
    });

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Items"</h1>
            </header>

            <main class="app-main">
                <section class="form-section">
                    <h2>"Add New Item"</h2>
                    {move || error.get().map(|msg| view! { <p class="error">{msg}</p> })}
                    <form on:submit=on_submit>
                        <input
                            type="text"
                            name="name"
                            placeholder="Item Name"
                            required=true
                            prop:value=move || state.with(|s| s.form.name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.form.name = value);
                            }
                        />
                        <input
                            type="text"
                            name="description"
                            placeholder="Description"
                            prop:value=move || state.with(|s| s.form.description.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.form.description = value);
                            }
                        />
                        <input
                            type="number"
                            name="price"
                            placeholder="Price"
                            required=true
                            min="0"
                            step="0.01"
                            prop:value=move || state.with(|s| s.form.price.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.form.price = value);
                            }
                        />
                        <button type="submit">"Add Item"</button>
                    </form>
                </section>

                <section class="items-section">
                    <h2>"Items"</h2>
                    {move || {
                        let ListSnapshot { loading, items } = list.get();
                        if loading {
                            view! { <p>"Loading..."</p> }.into_view()
                        } else if items.is_empty() {
                            view! { <p>"No items found. Add one above!"</p> }.into_view()
                        } else {
                            view! {
                                <ul class="items-list">
                                    {items
                                        .into_iter()
                                        .map(|item| view! { <ItemCard item=item on_delete=on_delete/> })
                                        .collect_view()}
                                </ul>
                            }
                                .into_view()
                        }
                    }}
                </section>
            </main>
        </div>
    }
}

#[component]
fn ItemCard(item: Item, on_delete: Callback<String>) -> impl IntoView {
    let price = item.price_label();
    let Item {
        id,
        name,
        description,
        ..
    } = item;

    view! {
        <li class="item-card">
            <div class="item-info">
                <h3>{name}</h3>
                {description.filter(|d| !d.is_empty()).map(|d| view! { <p>{d}</p> })}
                <span class="item-price">{price}</span>
            </div>
            <button class="delete-btn" on:click=move |_| on_delete.call(id.clone())>
                "Delete"
            </button>
        </li>
    }
}
