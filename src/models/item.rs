use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use super::PatchField;
use crate::{db::entities::item, error::AppError};

/// Item as it travels over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_date: DateTime<Utc>,
    pub modified_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Timestamps compare by instant; an absent timestamp only equals another
/// absent one.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.description == other.description
            && self.is_active == other.is_active
            && self.created_date == other.created_date
            && same_instant(self.modified_date, other.modified_date)
            && same_instant(self.completed_date, other.completed_date)
    }
}

impl Eq for Item {}

fn same_instant(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

impl From<item::Model> for Item {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            created_date: model.created_date,
            modified_date: model.modified_date,
            completed_date: model.completed_date,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CreateItem {
    /// Row for a brand new item; `id` is left to storage.
    pub fn into_active_model(self, now: DateTime<Utc>) -> item::ActiveModel {
        item::ActiveModel {
            id: NotSet,
            title: Set(self.title),
            description: Set(self.description),
            created_date: Set(now),
            modified_date: Set(None),
            completed_date: Set(None),
            is_active: Set(true),
        }
    }
}

/// Body of `PUT /items/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl ReplaceItem {
    pub fn apply(self, model: &mut item::Model, now: DateTime<Utc>) {
        model.title = self.title;
        model.description = self.description;
        model.completed_date = self.completed_date;
        model.is_active = self.is_active;
        model.modified_date = Some(now);
    }
}

/// Body of `PATCH /items/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchItem {
    #[serde(default)]
    pub title: PatchField<String>,
    #[serde(default)]
    pub description: PatchField<String>,
    #[serde(default)]
    pub completed_date: PatchField<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: PatchField<bool>,
}

impl PatchItem {
    pub fn has_changes(&self) -> bool {
        !(self.title.is_absent()
            && self.description.is_absent()
            && self.completed_date.is_absent()
            && self.is_active.is_absent())
    }

    /// Rejects empty patches and `null` on columns that cannot hold one.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.has_changes() {
            return Err(AppError::bad_request("No changes detected"));
        }
        if self.title.is_null() {
            return Err(AppError::bad_request("title must not be null"));
        }
        if self.description.is_null() {
            return Err(AppError::bad_request("description must not be null"));
        }
        if self.is_active.is_null() {
            return Err(AppError::bad_request("isActive must not be null"));
        }
        Ok(())
    }

    /// Merges present fields into `model`. Call `validate` first: a stray
    /// `Null` on a non-nullable field is ignored here.
    pub fn apply(self, model: &mut item::Model, now: DateTime<Utc>) {
        if let PatchField::Value(title) = self.title {
            model.title = title;
        }
        if let PatchField::Value(description) = self.description {
            model.description = description;
        }
        match self.completed_date {
            PatchField::Value(completed) => model.completed_date = Some(completed),
            PatchField::Null => model.completed_date = None,
            PatchField::Absent => {}
        }
        if let PatchField::Value(is_active) = self.is_active {
            model.is_active = is_active;
        }
        model.modified_date = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::{Item, PatchItem, ReplaceItem};
    use crate::{db::entities::item, error::AppError};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap()
    }

    fn bouldering() -> item::Model {
        item::Model {
            id: 1,
            title: "Bouldering".to_string(),
            description: "Go to Vertical Endeavors and try bouldering.".to_string(),
            created_date: created(),
            modified_date: None,
            completed_date: None,
            is_active: true,
        }
    }

    fn patch(json: &str) -> PatchItem {
        serde_json::from_str(json).expect("patch should deserialize")
    }

    #[test]
    fn title_only_patch_leaves_other_fields_alone() {
        let now = created() + Duration::hours(2);
        let mut model = bouldering();
        let before = model.clone();

        patch(r#"{"title":"Top rope"}"#).apply(&mut model, now);

        assert_eq!(model.title, "Top rope");
        assert_eq!(model.modified_date, Some(now));
        assert_eq!(model.description, before.description);
        assert_eq!(model.completed_date, before.completed_date);
        assert_eq!(model.is_active, before.is_active);
        assert_eq!(model.created_date, before.created_date);
    }

    #[test]
    fn empty_patch_is_rejected() {
        let err = patch("{}").validate().expect_err("empty patch");
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "No changes detected"));
    }

    #[test]
    fn empty_string_counts_as_a_change() {
        let body = patch(r#"{"description":""}"#);
        assert!(body.validate().is_ok());

        let mut model = bouldering();
        body.apply(&mut model, created());
        assert_eq!(model.description, "");
    }

    #[test]
    fn null_title_is_rejected() {
        let err = patch(r#"{"title":null}"#).validate().expect_err("null title");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn null_completed_date_clears_it() {
        let mut model = bouldering();
        model.completed_date = Some(created());

        let body = patch(r#"{"completedDate":null}"#);
        body.validate().expect("clearing is a change");
        body.apply(&mut model, created());

        assert_eq!(model.completed_date, None);
    }

    #[test]
    fn replace_overwrites_every_mutable_field() {
        let now = created() + Duration::days(1);
        let mut model = bouldering();
        model.completed_date = Some(created());

        let body: ReplaceItem = serde_json::from_str(
            r#"{"title":"Updated Item","description":"This item has been updated","isActive":false}"#,
        )
        .expect("replace should deserialize");
        body.apply(&mut model, now);

        assert_eq!(model.title, "Updated Item");
        assert_eq!(model.description, "This item has been updated");
        assert_eq!(model.completed_date, None);
        assert!(!model.is_active);
        assert_eq!(model.modified_date, Some(now));
        assert_eq!(model.created_date, created());
        assert_eq!(model.id, 1);
    }

    #[test]
    fn replace_requires_title_and_active_flag() {
        assert!(serde_json::from_str::<ReplaceItem>(r#"{"title":"x"}"#).is_err());
        assert!(serde_json::from_str::<ReplaceItem>(r#"{"isActive":true}"#).is_err());
    }

    #[test]
    fn equality_compares_timestamps_by_instant_and_presence() {
        let a = Item::from(bouldering());
        let mut b = a.clone();
        assert_eq!(a, b);

        b.modified_date = Some(created());
        assert_ne!(a, b);

        let mut c = a.clone();
        c.completed_date = Some(created());
        let mut d = a.clone();
        d.completed_date = Some(
            DateTime::parse_from_rfc3339("2026-01-01T03:00:00-05:00")
                .unwrap()
                .with_timezone(&Utc),
        );
        assert_eq!(c, d);
    }

    #[test]
    fn serializes_camel_case_with_null_dates() {
        let json = serde_json::to_value(Item::from(bouldering())).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["isActive"], true);
        assert!(json["modifiedDate"].is_null());
        assert!(json["completedDate"].is_null());
        assert!(json["createdDate"].is_string());
    }
}
