use std::collections::{HashMap, HashSet};
use std::io::Read;

use asset_core::db::ListFilter;
use asset_core::drafts::AssetDraft;
use asset_core::{Asset, Category, InventoryStore, NewAsset, NewCategory, RepositoryError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when importing an asset register.
#[derive(Debug, Error)]
pub enum AssetLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid record on line {line}: {}", .errors.join(" "))]
    InvalidRecord { line: u64, errors: Vec<String> },

    #[error("Tag '{tag}' appears more than once (line {line})")]
    DuplicateTag { tag: String, line: u64 },

    #[error("Category '{0}' is archived; restore it before importing assets into it")]
    CategoryArchived(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for AssetLoaderError {
    fn from(err: csv::Error) -> Self {
        AssetLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of an asset register CSV file.
///
/// Columns:
/// - `tag`: inventory tag, unique per organization (required)
/// - `name`: asset name (required)
/// - `category`: category name; created when it does not exist yet
/// - `value`: declared value (required)
/// - `purchase_price`: cost basis for depreciation, empty to use `value`
/// - `purchase_date`: `YYYY-MM-DD`, empty when unknown
/// - `useful_life_years`: empty to inherit the category default
/// - `serial_number`
///
/// Fields are kept as text and checked with the same rules as the asset
/// form, so an import and a manual entry reject the same values.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AssetRecord {
    /// 1-based line in the source file, header included.
    #[serde(skip)]
    pub line: u64,
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub value: String,
    #[serde(default)]
    pub purchase_price: String,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub useful_life_years: String,
    #[serde(default)]
    pub serial_number: String,
}

impl AssetRecord {
    fn draft(
        &self,
        category_id: Option<i64>,
    ) -> AssetDraft {
        AssetDraft {
            tag: self.tag.clone(),
            name: self.name.clone(),
            serial_number: self.serial_number.clone(),
            category_id,
            value: self.value.clone(),
            purchase_price: self.purchase_price.clone(),
            purchase_date: self.purchase_date.clone(),
            useful_life_years: self.useful_life_years.clone(),
            ..AssetDraft::default()
        }
    }

    fn validate(
        &self,
        category_id: Option<i64>,
    ) -> Result<NewAsset, AssetLoaderError> {
        self.draft(category_id)
            .validate()
            .map_err(|e| AssetLoaderError::InvalidRecord {
                line: self.line,
                errors: e.messages().to_vec(),
            })
    }
}

/// Counts reported after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub assets_created: usize,
    pub assets_updated: usize,
    pub categories_created: usize,
}

/// Loader for asset registers stored as CSV.
///
/// Writes go through [`InventoryStore`], so any backend works.
pub struct AssetLoader;

impl AssetLoader {
    /// Parse asset records from a CSV reader.
    ///
    /// Surrounding whitespace is trimmed from every field. Missing required
    /// columns and malformed rows are reported as [`AssetLoaderError::CsvParse`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<AssetRecord>, AssetLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let row = result?;
            let mut record: AssetRecord = row.deserialize(Some(&headers))?;
            record.line = row.position().map_or(0, |p| p.line());
            records.push(record);
        }

        Ok(records)
    }

    /// Load asset records into the store.
    ///
    /// Every record is validated before anything is written, so a bad row or
    /// an archived category leaves the store untouched. Then, row by row:
    /// 1. Resolve the category by name (case-insensitive), creating it if missing
    /// 2. Fill an empty useful life from the category default
    /// 3. Update the asset with the same tag, or register a new one
    ///
    /// Reloading the same file produces the same register. Updates keep the
    /// asset's status, location, assignee and archive state.
    pub async fn load(
        store: &dyn InventoryStore,
        records: &[AssetRecord],
        actor: &str,
    ) -> Result<LoadSummary, AssetLoaderError> {
        let mut categories: HashMap<String, Category> = store
            .categories()
            .list(ListFilter::ALL)
            .await?
            .into_iter()
            .map(|c| (c.name.to_lowercase(), c))
            .collect();

        let mut tags = HashSet::new();
        for record in records {
            let new_asset = record.validate(None)?;
            if !tags.insert(new_asset.tag.clone()) {
                return Err(AssetLoaderError::DuplicateTag {
                    tag: new_asset.tag,
                    line: record.line,
                });
            }
            let archived = categories
                .get(&record.category.trim().to_lowercase())
                .filter(|c| c.archived);
            if let Some(category) = archived {
                return Err(AssetLoaderError::CategoryArchived(category.name.clone()));
            }
        }

        let mut existing: HashMap<String, Asset> = store
            .assets()
            .list(ListFilter::ALL)
            .await?
            .into_iter()
            .map(|a| (a.tag.clone(), a))
            .collect();

        let mut summary = LoadSummary::default();

        for record in records {
            let category = match record.category.trim() {
                "" => None,
                name => {
                    let key = name.to_lowercase();
                    if !categories.contains_key(&key) {
                        let created = store
                            .categories()
                            .create(
                                NewCategory {
                                    name: name.to_string(),
                                    description: None,
                                    default_useful_life_years: None,
                                },
                                actor,
                            )
                            .await?;
                        debug!(category = %created.name, id = created.id, "category created");
                        summary.categories_created += 1;
                        categories.insert(key.clone(), created);
                    }
                    categories.get(&key)
                }
            };
            let mut new_asset = record.validate(category.map(|c| c.id))?;
            if new_asset.useful_life_years.is_none() {
                new_asset.useful_life_years =
                    category.and_then(|c| c.default_useful_life_years);
            }

            match existing.remove(&new_asset.tag) {
                Some(mut asset) => {
                    asset.name = new_asset.name;
                    asset.serial_number = new_asset.serial_number.or(asset.serial_number);
                    asset.category_id = new_asset.category_id;
                    asset.value = new_asset.value;
                    asset.purchase_price = new_asset.purchase_price;
                    asset.purchase_date = new_asset.purchase_date;
                    asset.useful_life_years = new_asset.useful_life_years;
                    store.assets().update(&asset).await?;
                    summary.assets_updated += 1;
                }
                None => {
                    store.assets().create(new_asset, actor).await?;
                    summary.assets_created += 1;
                }
            }
        }

        info!(
            created = summary.assets_created,
            updated = summary.assets_updated,
            categories_created = summary.categories_created,
            actor,
            "asset register loaded"
        );
        Ok(summary)
    }
}
