use leptos::prelude::*;

use aini_domain::service::{ServiceAvailability, ServiceKind};

/// Availability badge for a state-management service.
///
/// Consul links to its UI; S3 has nothing to link to.
#[component]
pub fn ServiceBadge(
    #[prop(into)] service: Signal<ServiceAvailability>,
    #[prop(optional)] href: Option<&'static str>,
) -> impl IntoView {
    let class = move || {
        let service = service.get();
        match (service.available, service.name) {
            (true, _) => "service-badge service-ok",
            (false, ServiceKind::Consul) => "service-badge service-down",
            (false, ServiceKind::S3) => "service-badge service-off",
        }
    };
    let text = move || {
        let service = service.get();
        format!("{}: {}", service.name.title(), service.label())
    };
    let badge = move || view! { <div class=class>{text}</div> };

    match href {
        Some(href) => view! {
            <a href=href target="_blank" rel="noopener noreferrer">{badge}</a>
        }
        .into_any(),
        None => badge().into_any(),
    }
}
