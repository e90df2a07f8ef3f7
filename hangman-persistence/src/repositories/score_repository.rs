use async_trait::async_trait;
use hangman_core::ScoreRepository;
use hangman_types::{
    HangmanError, LeaderboardQuery, Score, ScoreSubmission, SortDirection, SortField,
};
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, Order, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::db_err;
use crate::entities::{prelude::*, scores};

pub struct SeaOrmScoreRepository {
    db: DatabaseConnection,
}

impl SeaOrmScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_score(model: scores::Model) -> Score {
        Score {
            id: model.id,
            player: model.player,
            word: model.word,
            points: model.score.max(0) as u32,
            time_taken: model.time_taken.max(0) as u32,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    fn to_column_value(value: u32, field: &str) -> Result<i32, HangmanError> {
        i32::try_from(value)
            .map_err(|_| HangmanError::validation(format!("{} is out of range", field)))
    }
}

#[async_trait]
impl ScoreRepository for SeaOrmScoreRepository {
    async fn insert(&self, score: ScoreSubmission) -> Result<Score, HangmanError> {
        let model = scores::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            player: ActiveValue::Set(score.player),
            word: ActiveValue::Set(score.word),
            score: ActiveValue::Set(Self::to_column_value(score.points, "score")?),
            time_taken: ActiveValue::Set(Self::to_column_value(score.time_taken, "time_taken")?),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved = Scores::insert(model).exec(&self.db).await.map_err(db_err)?;

        let created = Scores::find_by_id(saved.last_insert_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| HangmanError::persistence("Failed to retrieve created score"))?;

        Ok(Self::model_to_score(created))
    }

    async fn top(&self, query: LeaderboardQuery) -> Result<Vec<Score>, HangmanError> {
        let column = match query.sort {
            SortField::Points => scores::Column::Score,
            SortField::TimeTaken => scores::Column::TimeTaken,
        };
        let order = match query.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let models = Scores::find()
            .order_by(column, order)
            .order_by_asc(scores::Column::CreatedAt)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(Self::model_to_score).collect())
    }
}
