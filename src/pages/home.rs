use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::times_table::{DiagramConfig, TimesTableSvg};

/// Full-window diagram. Query parameters (`n`, `m`, `step`, `fps`, `policy`)
/// override the defaults.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = Signal::derive(move || {
		let params = query.get();
		DiagramConfig::from_params(|key| params.get(key))
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<TimesTableSvg config=config />
			</div>
		</ErrorBoundary>
	}
}
