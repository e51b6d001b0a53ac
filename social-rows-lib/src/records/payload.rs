use super::{Category, MetricBundle, MetricRecord, Platform};
use core::str::FromStr;
use serde_json::Value;
use strum::IntoEnumIterator;

/// Split an API response body into one bundle per selected platform.
///
/// The `data` member is read in one of three shapes:
///
/// - nested, with a `<platform>_data` object per platform holding category arrays
/// - flat, with the category arrays directly under `data`
/// - a plain array of records, each tagged with a `content_type` naming its category
///
/// In the flat shapes every record is routed by its own `platform` tag. Untagged records go to the
/// first selected platform. Records tagged for an unselected or unknown platform are dropped.
///
/// The result always holds one entry per selected platform, in selection order. Malformed input
/// yields empty bundles.
#[must_use]
pub fn parse_bundles(body: &Value, platforms: &[Platform]) -> Vec<(Platform, MetricBundle)> {
    let mut bundles: Vec<(Platform, MetricBundle)> = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !bundles.iter().any(|(p, _)| p == platform) {
            bundles.push((*platform, MetricBundle::new()));
        }
    }

    let Some(data) = body.get("data") else {
        log::debug!("response body has no 'data' member");
        return bundles;
    };

    let nested = platforms.iter().any(|p| data.get(p.data_key()).is_some_and(Value::is_object));
    if nested {
        for (platform, bundle) in &mut bundles {
            if let Some(section) = data.get(platform.data_key()) {
                *bundle = MetricBundle::from_json(section);
            }
        }
    } else {
        for (category, record) in flat_records(data) {
            route(&mut bundles, category, record);
        }
    }

    for (platform, bundle) in &bundles {
        log::debug!("parsed {} record(s) for {platform}", bundle.record_count());
    }

    bundles
}

fn flat_records(data: &Value) -> Vec<(Category, MetricRecord)> {
    match data {
        Value::Object(_) => {
            let bundle = MetricBundle::from_json(data);
            Category::iter()
                .flat_map(|category| bundle.records(category).iter().map(move |r| (category, r.clone())))
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .filter_map(MetricRecord::from_value)
            .map(|record| {
                let category = record
                    .text("content_type")
                    .and_then(|tag| Category::from_bundle_key(&tag))
                    .unwrap_or(Category::Page);
                (category, record)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn route(bundles: &mut [(Platform, MetricBundle)], category: Category, record: MetricRecord) {
    let target = match record.text("platform") {
        Some(tag) => match Platform::from_str(&tag) {
            Ok(platform) => bundles.iter_mut().find(|(p, _)| *p == platform),
            Err(_) => {
                log::debug!("dropping {category} record with unknown platform '{tag}'");
                return;
            }
        },
        None => bundles.first_mut(),
    };

    if let Some((_, bundle)) = target {
        bundle.push(category, record);
    } else {
        log::debug!("dropping {category} record for an unselected platform");
    }
}
