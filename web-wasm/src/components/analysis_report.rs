//! 解析レポートコンポーネント
//!
//! `#report-content` 以下がPDF出力の対象。

use crate::export::pdf_wasm;
use ecowaste_common::report::{donut_arc_path, ReportView};
use ecowaste_common::{BusyGuard, ViewEvent, ViewState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub const REPORT_ELEMENT_ID: &str = "report-content";

const EXPORT_FAILURE_MESSAGE: &str = "Failed to export PDF. Please try again.";
const BAR_COLOR: &str = "#10B981";

#[component]
pub fn AnalysisReport(state: RwSignal<ViewState>) -> impl IntoView {
    let exporting = RwSignal::new(false);

    let on_export = move |_| {
        let Some(guard) = BusyGuard::try_acquire(exporting.get_untracked(), move |busy| exporting.set(busy)) else {
            return;
        };
        spawn_local(async move {
            let _guard = guard;
            match pdf_wasm::export_report_pdf(REPORT_ELEMENT_ID).await {
                Ok(file_name) => gloo::console::log!(format!("PDF saved: {}", file_name)),
                Err(e) => {
                    gloo::console::error!(format!("PDF export failed: {}", e));
                    gloo::dialogs::alert(EXPORT_FAILURE_MESSAGE);
                }
            }
        });
    };

    let on_reset = move |_| {
        state.update(|s| {
            if let Err(e) = s.apply(ViewEvent::Reset) {
                gloo::console::warn!(e.to_string());
            }
        });
    };

    let image = move || state.with(|s| s.uploaded_image().map(|img| img.as_str().to_string()));
    let report = move || state.with(|s| s.result().map(ReportView::build));

    view! {
        <div class="report">
            <div class="action-bar">
                <h2>"Analysis Results"</h2>
                <button
                    class="btn btn-blue"
                    disabled=move || exporting.get()
                    on:click=on_export
                >
                    {move || if exporting.get() { "Generating PDF..." } else { "Export as PDF" }}
                </button>
            </div>

            <div id=REPORT_ELEMENT_ID class="report-content">
                {move || report().map(|view_model| {
                    let src = image();
                    view! {
                        <Overview view_model=view_model.clone() image=src />
                        <StatCards view_model=view_model.clone() />
                        <div class="report-grid">
                            <div class="column">
                                <CompositionChart view_model=view_model.clone() />
                                <WeightBars view_model=view_model.clone() />
                            </div>
                            <div class="column">
                                <ClassificationTable view_model=view_model.clone() />
                                <ManagerReport view_model=view_model />
                            </div>
                        </div>
                    }
                })}
            </div>

            <div class="reset-bar">
                <button class="btn btn-dark" on:click=on_reset>"♻ Analyze New Sample"</button>
            </div>
        </div>
    }
}

#[component]
fn Overview(view_model: ReportView, image: Option<String>) -> impl IntoView {
    image.map(|src| {
        view! {
            <div class="card overview">
                <div class="overview-image">
                    <img src=src alt="Analyzed Waste" />
                </div>
                <div>
                    <h2>"Analysis Overview"</h2>
                    <p>
                        "Our AI has successfully identified "
                        <strong>{view_model.category_count}</strong>
                        " categories of waste and estimated a total weight of "
                        <strong>{view_model.total_weight_label.clone()}</strong>
                        "."
                    </p>
                    <span class="status-pill">"Processed Successfully"</span>
                </div>
            </div>
        }
    })
}

#[component]
fn StatCards(view_model: ReportView) -> impl IntoView {
    view! {
        <div class="stats">
            <div class="card stat stat-loss">
                <h3>"Est. Financial Loss"</h3>
                <p class="stat-value">{view_model.estimated_loss_label}</p>
                <p class="text-muted">{format!("Based on {}/g COGS", view_model.cogs_rate_label)}</p>
            </div>
            <div class="card stat stat-weight">
                <h3>"Total Waste Weight"</h3>
                <p class="stat-value">{view_model.total_weight_grams} <span class="unit">" g"</span></p>
                <p class="text-muted">"Estimated from visual data"</p>
            </div>
            <div class="card stat stat-issue">
                <h3>"Biggest Loss Category"</h3>
                <p class="stat-value">{view_model.biggest_loss_category}</p>
                <p class="text-muted">"Requires immediate attention"</p>
            </div>
        </div>
    }
}

#[component]
fn CompositionChart(view_model: ReportView) -> impl IntoView {
    let mut start = 0.0;
    let arcs = view_model
        .slices
        .iter()
        .map(|slice| {
            let d = donut_arc_path(100.0, 100.0, 80.0, 60.0, start, slice.fraction);
            start += slice.fraction;
            view! { <path d=d fill=slice.color fill-rule="evenodd" /> }
        })
        .collect_view();

    let legend = view_model
        .slices
        .into_iter()
        .map(|slice| {
            view! {
                <li>
                    <span class="swatch" style=format!("background: {}", slice.color) />
                    {format!("{} ({} g)", slice.category, slice.weight_grams)}
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="card">
            <h3>"Composition Analysis"</h3>
            <svg class="donut" viewBox="0 0 200 200" width="200" height="200">{arcs}</svg>
            <ul class="legend">{legend}</ul>
        </div>
    }
}

#[component]
fn WeightBars(view_model: ReportView) -> impl IntoView {
    let bars = view_model
        .bars
        .into_iter()
        .map(|bar| {
            view! {
                <div class="bar-item">
                    <div class="bar-track">
                        <div
                            class="bar"
                            style=format!("height: {:.1}%; background: {}", bar.height * 100.0, BAR_COLOR)
                            title=format!("{} g", bar.weight_grams)
                        />
                    </div>
                    <span class="bar-label">{bar.category}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="card">
            <h3>"Weight Distribution"</h3>
            <div class="bars">{bars}</div>
        </div>
    }
}

#[component]
fn ClassificationTable(view_model: ReportView) -> impl IntoView {
    let rows = view_model
        .rows
        .into_iter()
        .map(|row| {
            view! {
                <tr>
                    <td class="category">{row.category}</td>
                    <td>{row.weight_label}</td>
                    <td><span class=row.badge.css_class()>{row.status}</span></td>
                    <td class="notes">{row.notes}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="card table-card">
            <div class="card-header">
                <h3>"Detailed Waste Classification"</h3>
                <span class="live-pill">"Live Analysis"</span>
            </div>
            <table>
                <thead>
                    <tr>
                        <th>"Category"</th>
                        <th>"Est. Weight"</th>
                        <th>"Recyclable?"</th>
                        <th>"Identified Items"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[component]
fn ManagerReport(view_model: ReportView) -> impl IntoView {
    let recommendations = view_model
        .recommendations
        .into_iter()
        .map(|rec| view! { <li class="recommendation">"📉 " {rec}</li> })
        .collect_view();

    view! {
        <div class="card manager-report">
            <h3>"🍃 Manager's Reduction Report"</h3>
            <p>
                "The highest impact area identified is "
                <strong>{view_model.biggest_loss_category}</strong>
                ". Addressing this can significantly reduce the estimated "
                <strong>{view_model.estimated_loss_label}</strong>
                " daily loss."
            </p>
            <ul class="recommendations">{recommendations}</ul>
        </div>
    }
}
