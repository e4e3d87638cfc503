use loomap_domain::pagination::{Page, PageRequest};
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select,
};

/// Apply `LIMIT`/`OFFSET` from a [`PageRequest`].
pub trait Paginate {
    fn paginate_by(self, request: PageRequest) -> Self;
}

impl<E> Paginate for Select<E>
where
    E: EntityTrait,
{
    fn paginate_by(self, request: PageRequest) -> Self {
        self.offset(request.offset())
            .limit(u64::from(request.per_page))
    }
}

/// Count all rows matching `select`, then fetch the requested page.
pub async fn fetch_page<E>(
    select: Select<E>,
    db: &DatabaseConnection,
    request: PageRequest,
) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    let total = select.clone().count(db).await?;
    let items = select.paginate_by(request).all(db).await?;
    Ok(Page::new(items, total, request))
}
