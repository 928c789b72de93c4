//! SeaORM adapter for the generic repository.

use std::marker::PhantomData;
use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::{
    sea_query::{LikeExpr, SimpleExpr},
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, Value,
};
use uuid::Uuid;

use super::base::Repository;
use super::filter::{Filter, FilterValue};
use crate::domain::Identifiable;
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

/// Model type backing a persisted domain type.
pub type ModelOf<T> = <<T as Persisted>::Entity as EntityTrait>::Model;

/// Maps a domain type onto its SeaORM entity.
pub trait Persisted: Identifiable + Send + Sync + Sized + 'static {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync;

    fn from_model(model: ModelOf<Self>) -> Self;

    fn into_model(self) -> ModelOf<Self>;
}

/// Repository over any `Persisted` type backed by a SeaORM connection.
pub struct SeaRepository<T> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SeaRepository<T> {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<T> SeaRepository<T>
where
    T: Persisted,
    <T::Entity as EntityTrait>::Column: FromStr,
{
    fn select(filter: &Filter) -> AppResult<Select<T::Entity>> {
        Ok(T::Entity::find().filter(condition::<T::Entity>(filter)?))
    }

    fn ordered(mut select: Select<T::Entity>) -> Select<T::Entity> {
        for key in <T::Entity as EntityTrait>::PrimaryKey::iter() {
            select = select.order_by_asc(key.into_column());
        }
        select
    }
}

#[async_trait]
impl<T> Repository<T> for SeaRepository<T>
where
    T: Persisted,
    ModelOf<T>: IntoActiveModel<T::ActiveModel> + Sync,
    <T::Entity as EntityTrait>::Column: FromStr,
    <<T::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    async fn create(&self, entity: T) -> AppResult<T> {
        let active = entity.into_model().into_active_model().reset_all();
        let model = active.insert(&self.db).await.map_err(write_error)?;
        Ok(T::from_model(model))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        let model = T::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(T::from_model))
    }

    async fn get_by_condition(&self, filter: &Filter) -> AppResult<Option<T>> {
        let model = Self::select(filter)?.one(&self.db).await?;
        Ok(model.map(T::from_model))
    }

    async fn get_all(&self) -> AppResult<Vec<T>> {
        let models = Self::ordered(T::Entity::find()).all(&self.db).await?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn get_paged(&self, params: &PaginationParams) -> AppResult<Paginated<T>> {
        let total = T::Entity::find().count(&self.db).await?;
        let models = Self::ordered(T::Entity::find())
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await?;

        Ok(Paginated::new(
            models.into_iter().map(T::from_model).collect(),
            params.page(),
            params.limit(),
            total,
        ))
    }

    async fn find(&self, filter: &Filter) -> AppResult<Vec<T>> {
        let models = Self::ordered(Self::select(filter)?).all(&self.db).await?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn update(&self, entity: T) -> AppResult<T> {
        let active = entity.into_model().into_active_model().reset_all();
        let model = active.update(&self.db).await.map_err(write_error)?;
        Ok(T::from_model(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = T::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        Ok(Self::select(filter)?.count(&self.db).await?)
    }
}

fn write_error(err: DbErr) -> AppError {
    if matches!(err, DbErr::RecordNotUpdated) {
        return AppError::NotFound;
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Record"),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::validation("Referenced record does not exist")
        }
        _ => AppError::StoreUnavailable(err),
    }
}

/// Translate a `Filter` into a SeaORM condition for entity `E`.
///
/// Fields are resolved by column name; unknown names are a validation error.
pub fn condition<E>(filter: &Filter) -> AppResult<Condition>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    let column = |field: &str| {
        E::Column::from_str(field)
            .map_err(|_| AppError::validation(format!("Unknown field: {}", field)))
    };
    let expr = |expr: SimpleExpr| Condition::all().add(expr);

    let condition = match filter {
        Filter::All => Condition::all(),
        Filter::Eq {
            field,
            value: FilterValue::Null,
        } => expr(column(field)?.is_null()),
        Filter::Eq { field, value } => expr(column(field)?.eq(to_value(value))),
        Filter::Ne {
            field,
            value: FilterValue::Null,
        } => expr(column(field)?.is_not_null()),
        Filter::Ne { field, value } => expr(column(field)?.ne(to_value(value))),
        Filter::Gt { field, value } => expr(column(field)?.gt(to_value(value))),
        Filter::Gte { field, value } => expr(column(field)?.gte(to_value(value))),
        Filter::Lt { field, value } => expr(column(field)?.lt(to_value(value))),
        Filter::Lte { field, value } => expr(column(field)?.lte(to_value(value))),
        Filter::Contains { field, value } => expr(column(field)?.like(contains_pattern(value))),
        Filter::IsNull { field } => expr(column(field)?.is_null()),
        Filter::And { filters } => filters
            .iter()
            .try_fold(Condition::all(), |acc, f| {
                Ok::<_, AppError>(acc.add(condition::<E>(f)?))
            })?,
        Filter::Or { filters } => filters
            .iter()
            .try_fold(Condition::any(), |acc, f| {
                Ok::<_, AppError>(acc.add(condition::<E>(f)?))
            })?,
        Filter::Not { filter } => condition::<E>(filter)?.not(),
    };

    Ok(condition)
}

/// `%value%` with LIKE metacharacters escaped, so the match is a literal substring.
fn contains_pattern(value: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');

    LikeExpr::new(escaped).escape('\\')
}

fn to_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Null => Value::String(None),
        FilterValue::Bool(b) => Value::from(*b),
        FilterValue::Int(i) => Value::from(*i),
        FilterValue::Float(f) => Value::from(*f),
        FilterValue::Uuid(u) => Value::from(*u),
        FilterValue::Text(s) => Value::from(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::entities::user::Entity as UserEntity;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(filter: &Filter) -> String {
        UserEntity::find()
            .filter(condition::<UserEntity>(filter).unwrap())
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_eq_translates_to_where_clause() {
        let sql = sql(&Filter::eq("email", "alice@example.com"));
        assert!(sql.contains(r#""users"."email" = 'alice@example.com'"#), "{}", sql);
    }

    #[test]
    fn test_null_eq_becomes_is_null() {
        let sql = sql(&Filter::eq("username", FilterValue::Null));
        assert!(sql.contains("IS NULL"), "{}", sql);
    }

    #[test]
    fn test_combinators_translate() {
        let sql = sql(&Filter::or(vec![
            Filter::eq("email", "a@example.com"),
            Filter::contains("username", "bob"),
        ]));

        assert!(sql.contains(" OR "), "{}", sql);
        assert!(sql.contains("LIKE '%bob%'"), "{}", sql);
    }

    #[test]
    fn test_contains_escapes_like_wildcards() {
        let sql = sql(&Filter::contains("username", "50%_off"));

        assert!(sql.contains("ESCAPE"), "{}", sql);
        assert!(!sql.contains("'%50%_off%'"), "{}", sql);
    }

    #[test]
    fn test_nested_combinators_translate() {
        let filter = Filter::and(vec![
            Filter::or(vec![Filter::eq("username", "a"), Filter::eq("username", "b")]),
            Filter::not(Filter::is_null("email")),
        ]);

        let sql = sql(&filter);

        assert!(sql.contains(" OR "), "{}", sql);
        assert!(sql.contains("NOT"), "{}", sql);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = condition::<UserEntity>(&Filter::eq("no_such_column", 1i64));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
