//! Snapshot builder: normalize a raw release listing into a [`Snapshot`].
//!
//! Totals are derived bottom-up (asset counts -> release total -> snapshot
//! total) so the three levels can never disagree. A listing that fails
//! validation produces no snapshot at all.

use std::collections::HashSet;

use crate::core::schema::{Asset, Release, Snapshot};
use crate::listing::{RawAsset, RawRelease};
use crate::{StatsError, StatsResult};

/// Build a snapshot taken at `timestamp_seconds` from a raw listing.
///
/// Listing order is preserved. Missing names default to `""` and missing
/// download counts to `0`; a missing or duplicate id, or a negative count,
/// rejects the whole listing.
pub fn build(timestamp_seconds: i64, listing: &[RawRelease]) -> StatsResult<Snapshot> {
    let mut releases = Vec::with_capacity(listing.len());
    let mut seen_ids = HashSet::new();
    let mut total_download_count = 0i64;

    for (index, raw) in listing.iter().enumerate() {
        let release = convert_release(index, raw)?;
        if !seen_ids.insert(release.id) {
            return Err(StatsError::InvalidListing(format!(
                "duplicate release id {}",
                release.id
            )));
        }
        total_download_count += release.total_download_count;
        releases.push(release);
    }

    Ok(Snapshot {
        timestamp_seconds,
        releases,
        total_download_count,
    })
}

fn convert_release(index: usize, raw: &RawRelease) -> StatsResult<Release> {
    let id = raw.id.ok_or_else(|| {
        StatsError::InvalidListing(format!("release at index {index} has no id"))
    })?;

    let mut assets = Vec::with_capacity(raw.assets.len());
    let mut seen_ids = HashSet::new();
    let mut total_download_count = 0i64;

    for (asset_index, raw_asset) in raw.assets.iter().enumerate() {
        let asset = convert_asset(id, asset_index, raw_asset)?;
        if !seen_ids.insert(asset.id) {
            return Err(StatsError::InvalidListing(format!(
                "duplicate asset id {} in release {id}",
                asset.id
            )));
        }
        total_download_count += asset.download_count;
        assets.push(asset);
    }

    Ok(Release {
        id,
        tag_name: raw.tag_name.clone().unwrap_or_default(),
        assets,
        total_download_count,
    })
}

fn convert_asset(release_id: i64, index: usize, raw: &RawAsset) -> StatsResult<Asset> {
    let id = raw.id.ok_or_else(|| {
        StatsError::InvalidListing(format!(
            "asset at index {index} of release {release_id} has no id"
        ))
    })?;

    let download_count = raw.download_count.unwrap_or(0);
    if download_count < 0 {
        return Err(StatsError::InvalidListing(format!(
            "asset {id} has negative download count {download_count}"
        )));
    }

    Ok(Asset {
        id,
        name: raw.name.clone().unwrap_or_default(),
        download_count,
    })
}
