use actix_web::{get, post, web, HttpResponse};

use crate::balance::compute_balances;
use crate::error::RepositoryError;
use crate::repository::GroupRepository;
use crate::schemas::{Group, NewExpense, NewGroup};
use crate::summary::compute_summary;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(list_groups)
        .service(add_group)
        .service(get_group)
        .service(add_expense)
        .service(get_balance)
        .service(get_summary);
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

#[get("/groups")]
async fn list_groups(repository: web::Data<dyn GroupRepository>) -> HttpResponse {
    match repository.list_groups().await {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(err) => repository_error(err),
    }
}

#[post("/groups")]
async fn add_group(
    repository: web::Data<dyn GroupRepository>,
    json: web::Json<NewGroup>,
) -> HttpResponse {
    match repository.create_group(json.into_inner()).await {
        Ok(group) => HttpResponse::Created().json(group),
        Err(err) => repository_error(err),
    }
}

#[get("/groups/{id}")]
async fn get_group(
    repository: web::Data<dyn GroupRepository>,
    id: web::Path<String>,
) -> HttpResponse {
    match fetch_group(repository.get_ref(), &id).await {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(response) => response,
    }
}

#[post("/groups/{id}/expenses")]
async fn add_expense(
    repository: web::Data<dyn GroupRepository>,
    id: web::Path<String>,
    expense: web::Json<NewExpense>,
) -> HttpResponse {
    match repository.add_expense(&id, expense.into_inner()).await {
        Ok(expense) => HttpResponse::Created().json(expense),
        Err(err) => repository_error(err),
    }
}

#[get("/groups/{id}/balance")]
async fn get_balance(
    repository: web::Data<dyn GroupRepository>,
    id: web::Path<String>,
) -> HttpResponse {
    let group = match fetch_group(repository.get_ref(), &id).await {
        Ok(group) => group,
        Err(response) => return response,
    };
    match compute_balances(&group.members, &group.expenses) {
        Ok(balances) => HttpResponse::Ok().json(balances),
        Err(err) => {
            tracing::error!(group = %group.id, "{}", err);
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

#[get("/groups/{id}/summary")]
async fn get_summary(
    repository: web::Data<dyn GroupRepository>,
    id: web::Path<String>,
) -> HttpResponse {
    let group = match fetch_group(repository.get_ref(), &id).await {
        Ok(group) => group,
        Err(response) => return response,
    };
    match compute_summary(&group) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => {
            tracing::error!(group = %group.id, "{}", err);
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

async fn fetch_group(repository: &dyn GroupRepository, id: &str) -> Result<Group, HttpResponse> {
    match repository.get_group(id).await {
        Ok(Some(group)) => Ok(group),
        Ok(None) => Err(HttpResponse::NotFound().body("Couldn't find the desired group")),
        Err(err) => Err(repository_error(err)),
    }
}

fn repository_error(err: RepositoryError) -> HttpResponse {
    match err {
        RepositoryError::GroupNotFound(_) => HttpResponse::NotFound().body(err.to_string()),
        RepositoryError::Validation(_) => HttpResponse::BadRequest().body(err.to_string()),
        RepositoryError::Database(_) | RepositoryError::Serialization(_) => {
            tracing::error!("{}", err);
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}
