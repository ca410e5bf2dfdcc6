mod common;

use jobtracker::{
    models::{payment_ball, status::ColorStatus, sub_contract, task},
    repos::{
        clients::ClientsRepo,
        employees::EmployeesRepo,
        job_cards::JobCardsRepo,
        payment_balls::{CreatePaymentBall, PaymentBallsRepo},
        sub_contracts::{CreateSubContract, SubContractFilter, SubContractsRepo, UpdateSubContract},
        tasks::{CreateTask, TaskFilter, TasksRepo, UpdateTask},
    },
};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use common::{create_employee, create_hierarchy, date, setup_db};

async fn create_ball(db: &DatabaseConnection, job_card_id: &str) -> payment_ball::Model {
    PaymentBallsRepo::new(db.clone())
        .create(CreatePaymentBall {
            job_card_id: Some(job_card_id.to_string()),
            project_percentage: Some(dec!(50)),
            amount: Some(dec!(125000)),
            color_status: ColorStatus::Blue,
            ..Default::default()
        })
        .await
        .unwrap()
}

fn new_task(payment_ball_id: &str, assignee_id: Option<String>) -> CreateTask {
    CreateTask {
        payment_ball_id: Some(payment_ball_id.to_string()),
        task_brief: Some("Structural drawings".to_string()),
        weightage: Some(dec!(40)),
        due_date: Some(date(2026, 3, 15)),
        assignee_id,
        ..Default::default()
    }
}

fn new_sub_contract(task_id: &str, assignee_id: Option<String>) -> CreateSubContract {
    CreateSubContract {
        task_id: Some(task_id.to_string()),
        subcontract_brief: Some("Soil testing".to_string()),
        weightage: Some(dec!(25)),
        due_date: Some(date(2026, 3, 1)),
        assignee_id,
        ..Default::default()
    }
}

#[tokio::test]
async fn deleting_a_job_card_removes_everything_below_it() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;
    let task = TasksRepo::new(db.clone())
        .create(new_task(&ball.id, None))
        .await
        .unwrap();
    SubContractsRepo::new(db.clone())
        .create(new_sub_contract(&task.task.id, None))
        .await
        .unwrap();

    JobCardsRepo::new(db.clone())
        .delete(&hierarchy.job_card.id)
        .await
        .unwrap();

    assert_eq!(payment_ball::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(task::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(sub_contract::Entity::find().count(&db).await.unwrap(), 0);

    let err = JobCardsRepo::new(db.clone())
        .get(&hierarchy.job_card.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleting_a_client_cascades_to_job_cards() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    create_ball(&db, &hierarchy.job_card.id).await;

    ClientsRepo::new(db.clone())
        .delete(&hierarchy.client.id)
        .await
        .unwrap();

    assert!(JobCardsRepo::new(db.clone())
        .get(&hierarchy.job_card.id)
        .await
        .unwrap_err()
        .is_not_found());
    assert_eq!(payment_ball::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_an_employee_clears_assignments() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;
    let employee = create_employee(&db, "Ravi").await;

    let tasks_repo = TasksRepo::new(db.clone());
    let task = tasks_repo
        .create(new_task(&ball.id, Some(employee.id.clone())))
        .await
        .unwrap();
    assert_eq!(task.assignee_name.as_deref(), Some("Ravi"));

    let sub_contracts_repo = SubContractsRepo::new(db.clone());
    let sub_contract = sub_contracts_repo
        .create(new_sub_contract(&task.task.id, Some(employee.id.clone())))
        .await
        .unwrap();
    assert_eq!(sub_contract.assignee_name.as_deref(), Some("Ravi"));

    EmployeesRepo::new(db.clone())
        .delete(&employee.id)
        .await
        .unwrap();

    let task = tasks_repo.get(&task.task.id).await.unwrap();
    assert_eq!(task.task.assignee_id, None);
    assert_eq!(task.assignee_name, None);

    let sub_contract = sub_contracts_repo
        .get(&sub_contract.sub_contract.id)
        .await
        .unwrap();
    assert_eq!(sub_contract.sub_contract.assignee_id, None);
}

#[tokio::test]
async fn task_views_carry_parent_details() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;
    let tasks_repo = TasksRepo::new(db.clone());
    let task = tasks_repo.create(new_task(&ball.id, None)).await.unwrap();

    let details = task.payment_ball_details.expect("payment ball details");
    assert_eq!(details.project_percentage, dec!(50));

    let listed = tasks_repo
        .list(TaskFilter {
            payment_ball: Some(ball.id.clone()),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let other = tasks_repo
        .list(TaskFilter {
            payment_ball: Some("elsewhere".to_string()),
        })
        .await
        .unwrap();
    assert!(other.is_empty());

    SubContractsRepo::new(db.clone())
        .create(new_sub_contract(&task.task.id, None))
        .await
        .unwrap();
    let sub_contracts = SubContractsRepo::new(db.clone())
        .list(SubContractFilter {
            task: Some(task.task.id.clone()),
        })
        .await
        .unwrap();
    let task_details = sub_contracts[0].task_details.as_ref().unwrap();
    assert_eq!(task_details.task_brief, "Structural drawings");
}

#[tokio::test]
async fn weightage_out_of_range_is_rejected() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;
    let tasks_repo = TasksRepo::new(db.clone());

    let mut input = new_task(&ball.id, None);
    input.weightage = Some(dec!(150));
    let err = tasks_repo.create(input).await.unwrap_err();
    assert!(err.validation_errors().unwrap().has_error("weightage"));
    assert_eq!(task::Entity::find().count(&db).await.unwrap(), 0);

    let task = tasks_repo.create(new_task(&ball.id, None)).await.unwrap();
    let err = tasks_repo
        .update(
            &task.task.id,
            UpdateTask {
                completion_percentage: Some(dec!(100.5)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err
        .validation_errors()
        .unwrap()
        .has_error("completion_percentage"));
}

#[tokio::test]
async fn sub_contract_progress_out_of_range_is_rejected() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;
    let task = TasksRepo::new(db.clone())
        .create(new_task(&ball.id, None))
        .await
        .unwrap();
    let sub_contracts_repo = SubContractsRepo::new(db.clone());

    let mut input = new_sub_contract(&task.task.id, None);
    input.weightage = Some(dec!(100.01));
    input.completion_percentage = dec!(-1);
    let err = sub_contracts_repo.create(input).await.unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert!(errors.has_error("weightage"));
    assert!(errors.has_error("completion_percentage"));
    assert_eq!(sub_contract::Entity::find().count(&db).await.unwrap(), 0);

    let sub_contract = sub_contracts_repo
        .create(new_sub_contract(&task.task.id, None))
        .await
        .unwrap();
    let err = sub_contracts_repo
        .update(
            &sub_contract.sub_contract.id,
            UpdateSubContract {
                weightage: Some(dec!(101)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.validation_errors().unwrap().has_error("weightage"));

    let stored = sub_contracts_repo
        .get(&sub_contract.sub_contract.id)
        .await
        .unwrap();
    assert_eq!(stored.sub_contract.weightage, dec!(25));
}

#[tokio::test]
async fn unknown_assignee_is_a_field_error() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;

    let err = TasksRepo::new(db.clone())
        .create(new_task(&ball.id, Some("nobody".to_string())))
        .await
        .unwrap_err();
    assert!(err.validation_errors().unwrap().has_error("assignee_id"));
}

#[tokio::test]
async fn missing_parents_are_not_found() {
    let db = setup_db().await;

    let err = TasksRepo::new(db.clone())
        .create(new_task("missing", None))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = SubContractsRepo::new(db.clone())
        .create(new_sub_contract("missing", None))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn updates_stamp_updated_at() {
    let db = setup_db().await;
    let hierarchy = create_hierarchy(&db).await;
    let ball = create_ball(&db, &hierarchy.job_card.id).await;
    let tasks_repo = TasksRepo::new(db.clone());
    let task = tasks_repo.create(new_task(&ball.id, None)).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = tasks_repo
        .update(
            &task.task.id,
            UpdateTask {
                completion_percentage: Some(dec!(50)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.task.updated_at > task.task.updated_at);
    assert_eq!(updated.task.created_at, task.task.created_at);
    assert_eq!(updated.task.completion_percentage, dec!(50));
}
