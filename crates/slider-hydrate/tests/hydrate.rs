use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use parking_lot::Mutex;
use serde_json::json;
use slider_config::{Configuration, FormValues, PaginationKind, Switch, build_config, fields};
use slider_designer::{CreatedSlider, StructureBuilder};
use slider_dom::{DesignerHost, MemoryDocument, NodeId, PageDom, classes};
use slider_hydrate::{
    AssetManifest, BehaviorHandle, BehaviorOptions, CarouselBehavior, ChangeFeed, HydrateError,
    HydrationDriver, Hydrator, RecordingAssets, RecordingBehavior, SCRIPT_URL, STYLESHEET_URL,
    ScanReport,
};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

fn config(nav: bool, pag: bool) -> Configuration {
    let form = FormValues::defaults()
        .with(fields::NAV_ENABLED, nav.to_string())
        .with(fields::PAG_ENABLED, pag.to_string());
    build_config(&form).expect("valid form")
}

async fn add_slider(doc: &MemoryDocument, config: &Configuration) -> CreatedSlider {
    StructureBuilder::new(Arc::new(doc.clone()) as Arc<dyn DesignerHost>)
        .create(config, None)
        .await
        .expect("structure")
}

fn hydrator(doc: &MemoryDocument) -> (Arc<Hydrator>, Arc<RecordingBehavior>) {
    let behavior = Arc::new(RecordingBehavior::new());
    let hydrator = Hydrator::new(Arc::new(doc.clone()), behavior.clone());
    (Arc::new(hydrator), behavior)
}

/// A bare container carrying `raw` as its stored configuration.
fn bare_container(doc: &MemoryDocument, raw: Option<&str>) -> NodeId {
    let div = doc.element("div");
    doc.set_attr(div, classes::ATTR_CLASS, &classes::class_attr(&classes::CONTAINER))
        .unwrap();
    if let Some(raw) = raw {
        doc.set_attr(div, classes::ATTR_CONFIG, raw).unwrap();
    }
    doc.append_child(doc.root(), div).unwrap();
    div
}

#[tokio::test(flavor = "current_thread")]
async fn second_scan_attaches_nothing() {
    let doc = MemoryDocument::new();
    let created = add_slider(&doc, &config(true, true)).await;
    let (hydrator, behavior) = hydrator(&doc);

    let first = hydrator.scan();
    assert_eq!(first.visited, 1);
    assert_eq!(first.attached, vec![created.container]);

    let second = hydrator.scan();
    assert!(second.attached.is_empty());
    assert_eq!(second.already_attached, 1);
    assert_eq!(behavior.attach_count(created.container), 1);
    assert!(hydrator.handle(created.container).is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_configuration_skips_only_that_container() {
    let doc = MemoryDocument::new();
    let a = add_slider(&doc, &config(true, false)).await;
    let bad = bare_container(&doc, Some("{not json"));
    let c = add_slider(&doc, &config(false, true)).await;
    let (hydrator, behavior) = hydrator(&doc);

    let report = hydrator.scan();
    assert_eq!(report.visited, 3);
    assert_eq!(report.attached, vec![a.container, c.container]);
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(
        report.failed[0],
        HydrateError::ConfigParse { node, .. } if node == bad
    ));
    assert_eq!(behavior.attach_count(bad), 0);
    assert!(hydrator.handle(bad).is_none());
}

#[test]
fn container_without_configuration_is_counted() {
    let doc = MemoryDocument::new();
    let node = bare_container(&doc, None);
    let (hydrator, _) = hydrator(&doc);

    let report = hydrator.scan();
    assert_eq!(report.visited, 1);
    assert_eq!(report.missing_config, 1);
    assert!(report.failed.is_empty());
    assert!(hydrator.handle(node).is_none());
}

#[test]
fn empty_configuration_counts_as_missing() {
    let doc = MemoryDocument::new();
    let node = bare_container(&doc, Some(""));
    let (hydrator, behavior) = hydrator(&doc);

    let report = hydrator.scan();
    assert_eq!(report.missing_config, 1);
    assert!(report.failed.is_empty());
    assert_eq!(behavior.attach_count(node), 0);
}

/// Behavior that rescans the page from inside `attach`.
#[derive(Default)]
struct RescanningBehavior {
    hydrator: Mutex<Weak<Hydrator>>,
    nested: Mutex<Vec<ScanReport>>,
}

impl CarouselBehavior for RescanningBehavior {
    fn attach(
        &self,
        _container: NodeId,
        _options: &BehaviorOptions,
    ) -> Result<BehaviorHandle, String> {
        let hydrator = self.hydrator.lock().upgrade();
        if let Some(hydrator) = hydrator {
            let report = hydrator.scan();
            self.nested.lock().push(report);
        }
        Ok(BehaviorHandle(self.nested.lock().len() as u64))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn scan_from_inside_attach_skips_pending_containers() {
    let doc = MemoryDocument::new();
    let first = add_slider(&doc, &config(true, true)).await;
    let second = add_slider(&doc, &config(false, false)).await;
    let behavior = Arc::new(RescanningBehavior::default());
    let hydrator = Arc::new(Hydrator::new(Arc::new(doc.clone()), behavior.clone()));
    *behavior.hydrator.lock() = Arc::downgrade(&hydrator);

    let outer = hydrator.scan();
    assert_eq!(outer.attached, vec![first.container]);
    assert_eq!(outer.already_attached, 1);

    // Attaching the first container rescans and attaches the second, whose
    // own attachment rescans once more while both are pending.
    let nested = behavior.nested.lock().clone();
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[0].in_progress, 2);
    assert!(nested[0].attached.is_empty());
    assert_eq!(nested[1].in_progress, 1);
    assert_eq!(nested[1].attached, vec![second.container]);

    assert_eq!(hydrator.attached_count(), 2);
    assert!(hydrator.handle(first.container).is_some());
    assert!(hydrator.handle(second.container).is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn controls_resolve_inside_their_own_container() {
    let doc = MemoryDocument::new();
    let first = add_slider(&doc, &config(true, true)).await;
    let second = add_slider(&doc, &config(true, true)).await;
    let (hydrator, behavior) = hydrator(&doc);
    hydrator.scan();

    let attached = behavior.attached();
    assert_eq!(attached.len(), 2);
    for (container, options) in attached {
        let created = if container == first.container {
            &first
        } else {
            &second
        };
        let (next, prev) = created.navigation.expect("navigation");
        let Switch::On(nav) = options.navigation else {
            panic!("navigation off");
        };
        assert_eq!(nav.next_el, Some(next));
        assert_eq!(nav.prev_el, Some(prev));
        let Switch::On(pag) = options.pagination else {
            panic!("pagination off");
        };
        assert_eq!(pag.el, created.pagination);
        assert_eq!(pag.kind, PaginationKind::Bullets);
    }
}

#[tokio::test(flavor = "current_thread")]
async fn refused_attachment_is_retried() {
    let doc = MemoryDocument::new();
    let created = add_slider(&doc, &config(false, false)).await;
    let (hydrator, behavior) = hydrator(&doc);
    behavior.refuse(created.container);

    let report = hydrator.scan();
    assert!(report.attached.is_empty());
    assert!(matches!(report.failed[0], HydrateError::Attach { .. }));
    assert_eq!(hydrator.attached_count(), 0);

    behavior.allow(created.container);
    let report = hydrator.scan();
    assert_eq!(report.attached, vec![created.container]);
}

#[tokio::test(flavor = "current_thread")]
async fn options_overlay_shape() {
    let doc = MemoryDocument::new();
    let created = add_slider(&doc, &config(true, false)).await;
    let cfg = Configuration::from_json(
        &doc.attribute(created.container, classes::ATTR_CONFIG)
            .unwrap(),
    )
    .unwrap();
    let options = BehaviorOptions::overlay(cfg, &doc, created.container);
    let (next, prev) = created.navigation.unwrap();

    let value = options.to_value();
    assert_eq!(
        value["navigation"],
        json!({"nextEl": next.to_string(), "prevEl": prev.to_string()})
    );
    assert_eq!(value["pagination"], json!(false));
    assert_eq!(value["speed"], json!(300));
    assert_eq!(value["effect"], json!("slide"));
}

#[tokio::test(flavor = "current_thread")]
async fn assets_already_present_are_not_reloaded() {
    let assets = RecordingAssets::new().preloaded();
    slider_hydrate::load_assets(&assets, &AssetManifest::default())
        .await
        .unwrap();
    assert_eq!(assets.requests(), vec!["style:inline".to_string()]);

    let fresh = RecordingAssets::new();
    slider_hydrate::load_assets(&fresh, &AssetManifest::default())
        .await
        .unwrap();
    assert_eq!(
        fresh.requests(),
        vec![
            format!("stylesheet:{STYLESHEET_URL}"),
            format!("script:{SCRIPT_URL}"),
            "style:inline".to_string(),
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn asset_failure_prevents_scanning() {
    let doc = MemoryDocument::new();
    add_slider(&doc, &config(true, true)).await;
    let (hydrator, behavior) = hydrator(&doc);
    let driver = HydrationDriver::new(hydrator);
    let assets = RecordingAssets::new().failing(SCRIPT_URL);
    let (_tx, rx) = broadcast::channel(8);

    let err = driver
        .run(
            &assets,
            &AssetManifest::default(),
            ChangeFeed::Notifications(rx),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HydrateError::Assets { ref url, .. } if url == SCRIPT_URL));
    assert!(behavior.attached().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn closed_feed_ends_the_driver_after_initial_scan() {
    let doc = MemoryDocument::new();
    add_slider(&doc, &config(true, true)).await;
    let (hydrator, _) = hydrator(&doc);
    let driver = HydrationDriver::new(hydrator);
    let (tx, rx) = broadcast::channel(8);
    drop(tx);

    let summary = driver
        .run(
            &RecordingAssets::new().preloaded(),
            &AssetManifest::default(),
            ChangeFeed::Notifications(rx),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(summary.scans, 1);
    assert_eq!(summary.attached, 1);
}

async fn wait_for_attached(hydrator: &Hydrator, want: usize) {
    for _ in 0..200 {
        if hydrator.attached_count() == want {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {want} attached, have {}", hydrator.attached_count());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn added_slider_is_hydrated_from_notifications() {
    let doc = MemoryDocument::new();
    add_slider(&doc, &config(true, true)).await;
    let (hydrator, _) = hydrator(&doc);
    let rx = doc.subscribe();
    let cancel = CancellationToken::new();

    let task = tokio::spawn({
        let driver = HydrationDriver::new(hydrator.clone());
        let cancel = cancel.clone();
        async move {
            driver
                .run(
                    &RecordingAssets::new().preloaded(),
                    &AssetManifest::default(),
                    ChangeFeed::Notifications(rx),
                    cancel,
                )
                .await
        }
    });

    wait_for_attached(&hydrator, 1).await;
    let later = add_slider(&doc, &config(false, true)).await;
    wait_for_attached(&hydrator, 2).await;
    assert!(hydrator.handle(later.container).is_some());

    cancel.cancel();
    let summary = task.await.unwrap().unwrap();
    assert_eq!(summary.attached, 2);
    assert!(summary.scans >= 2);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn attribute_changes_do_not_trigger_rescans() {
    let doc = MemoryDocument::new();
    let created = add_slider(&doc, &config(true, true)).await;
    let (hydrator, _) = hydrator(&doc);
    let rx = doc.subscribe();
    let cancel = CancellationToken::new();

    let task = tokio::spawn({
        let driver = HydrationDriver::new(hydrator.clone());
        let cancel = cancel.clone();
        async move {
            driver
                .run(
                    &RecordingAssets::new().preloaded(),
                    &AssetManifest::default(),
                    ChangeFeed::Notifications(rx),
                    cancel,
                )
                .await
        }
    });

    wait_for_attached(&hydrator, 1).await;
    doc.set_attr(created.container, "title", "hello").unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    cancel.cancel();
    let summary = task.await.unwrap().unwrap();
    assert_eq!(summary.scans, 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn interval_feed_picks_up_new_sliders() {
    let doc = MemoryDocument::new();
    let (hydrator, _) = hydrator(&doc);
    let cancel = CancellationToken::new();

    let task = tokio::spawn({
        let driver = HydrationDriver::new(hydrator.clone());
        let cancel = cancel.clone();
        async move {
            driver
                .run(
                    &RecordingAssets::new().preloaded(),
                    &AssetManifest::default(),
                    ChangeFeed::Interval(Duration::from_millis(100)),
                    cancel,
                )
                .await
        }
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(hydrator.attached_count(), 0);
    add_slider(&doc, &config(true, false)).await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(hydrator.attached_count(), 1);

    cancel.cancel();
    let summary = task.await.unwrap().unwrap();
    assert_eq!(summary.attached, 1);
    assert!(summary.scans >= 2);
}
