use async_trait::async_trait;
use hangman_core::CustomWordRepository;
use hangman_types::{CustomWord, CustomWordId, HangmanError, NewCustomWord};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::db_err;
use crate::entities::{custom_words, prelude::*};

pub struct SeaOrmCustomWordRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomWordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_custom_word(model: custom_words::Model) -> CustomWord {
        CustomWord {
            id: model.id,
            word: model.word,
            creator_name: model.creator_name,
            category: model.category,
            is_used: model.is_used,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: CustomWordId) -> Result<Option<CustomWord>, HangmanError> {
        let model = CustomWords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(Self::model_to_custom_word))
    }
}

#[async_trait]
impl CustomWordRepository for SeaOrmCustomWordRepository {
    async fn insert(&self, word: NewCustomWord) -> Result<CustomWord, HangmanError> {
        let model = custom_words::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            word: ActiveValue::Set(word.word),
            creator_name: ActiveValue::Set(word.creator_name),
            category: ActiveValue::Set(word.category),
            is_used: ActiveValue::Set(false),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved = CustomWords::insert(model)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        self.find_by_id(saved.last_insert_id)
            .await?
            .ok_or_else(|| HangmanError::persistence("Failed to retrieve created custom word"))
    }

    async fn list_unused(&self) -> Result<Vec<CustomWord>, HangmanError> {
        let models = CustomWords::find()
            .filter(custom_words::Column::IsUsed.eq(false))
            .order_by_desc(custom_words::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(Self::model_to_custom_word).collect())
    }

    async fn mark_used(&self, id: CustomWordId) -> Result<Option<CustomWord>, HangmanError> {
        // The is_used filter makes the flip atomic, so only one caller sees a row change
        let result = CustomWords::update_many()
            .col_expr(custom_words::Column::IsUsed, Expr::value(true))
            .filter(custom_words::Column::Id.eq(id))
            .filter(custom_words::Column::IsUsed.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
