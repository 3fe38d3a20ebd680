//! HTTP tests against the full router wired with in-memory stores

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Datelike, Local};
use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;
use serde_json::json;

use domain_catalog::{Category, Client, ProductWithCategory};
use domain_identity::UserPort;
use domain_invoicing::{Invoice, InvoicePreview};
use infra_memory::{DemoData, MemoryStores};
use interface_api::config::ApiConfig;
use interface_api::dto::auth::AuthResponse;
use interface_api::dto::dashboard::DashboardResponse;
use interface_api::dto::invoice::{ComputeResponse, NextNumberResponse};
use interface_api::{create_router, AppState, Ports};
use test_utils::{ClientBuilder, ClientFixtures, InvoiceBuilder, InvoiceLineBuilder};

const ADMIN_EMAIL: &str = "admin@masociete.tn";
const ADMIN_PASSWORD: &str = "motdepasse-admin";

async fn server() -> TestServer {
    let stores = MemoryStores::new();
    DemoData::standard().load(&stores).await.unwrap();
    stores
        .users
        .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD, "Administrateur")
        .await
        .unwrap();

    let config = ApiConfig {
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    };
    TestServer::new(create_router(AppState::new(Ports::from(&stores), config))).unwrap()
}

async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<AuthResponse>().token
}

async fn admin_token(server: &TestServer) -> String {
    login(server, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

async fn user_token(server: &TestServer) -> String {
    let response = server
        .post("/auth/register")
        .json(&json!({ "email": "marie@example.tn", "password": "motdepasse", "nom": "Marie" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<AuthResponse>().token
}

async fn first_client(server: &TestServer, token: &str) -> Client {
    server
        .get("/api/v1/clients")
        .authorization_bearer(token)
        .await
        .json::<Vec<Client>>()
        .remove(0)
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_and_readiness() {
        let server = server().await;
        server.get("/health").await.assert_status_ok();

        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        let body: serde_json::Value = ready.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["adapters"].as_array().unwrap().len(), 5);
        assert_eq!(body["adapters"][0]["adapter_id"], "memory-clients");
        assert_eq!(body["adapters"][0]["rows"], 2);
    }
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_api_requires_token() {
        let server = server().await;
        server
            .get("/api/v1/clients")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/api/v1/clients")
            .authorization_bearer("not-a-token")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_then_me() {
        let server = server().await;
        let token = user_token(&server).await;

        let me: serde_json::Value = server
            .get("/api/v1/me")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(me["email"], "marie@example.tn");
        assert_eq!(me["role"], "user");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let server = server().await;
        user_token(&server).await;
        server
            .post("/auth/register")
            .json(&json!({ "email": "MARIE@example.tn", "password": "autremotdepasse", "nom": "Marie" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let server = server().await;
        let response = server
            .post("/auth/register")
            .json(&json!({ "email": "court@example.tn", "password": "court", "nom": "Court" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let server = server().await;
        server
            .post("/auth/login")
            .json(&json!({ "email": ADMIN_EMAIL, "password": "mauvais-mot" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_needs_two_characters() {
        let server = server().await;
        let token = user_token(&server).await;

        let found: Vec<Client> = server
            .get("/api/v1/clients/search")
            .add_query_param("q", "ab")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nom, "Entreprise ABC");

        let none: Vec<Client> = server
            .get("/api/v1/clients/search")
            .add_query_param("q", "a")
            .authorization_bearer(&token)
            .await
            .json();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let server = server().await;
        let token = user_token(&server).await;

        let created = server
            .post("/api/v1/clients")
            .authorization_bearer(&token)
            .json(&ClientBuilder::new().with_name("Atelier Nabeul").build())
            .await;
        created.assert_status(StatusCode::CREATED);
        let client: Client = created.json();

        let updated: Client = server
            .put(&format!("/api/v1/clients/{}", client.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&json!({ "telephone": "+216 72 000 000" }))
            .await
            .json();
        assert_eq!(updated.telephone, "+216 72 000 000");
        assert_eq!(updated.nom, "Atelier Nabeul");

        server
            .delete(&format!("/api/v1/clients/{}", client.id.as_uuid()))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/v1/clients/{}", client.id.as_uuid()))
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_client_without_name_rejected() {
        let server = server().await;
        let token = user_token(&server).await;
        let mut data = ClientFixtures::particulier();
        data.nom.clear();

        server
            .post("/api/v1/clients")
            .authorization_bearer(&token)
            .json(&data)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod catalog_tests {
    use super::*;

    #[tokio::test]
    async fn test_category_writes_are_admin_only() {
        let server = server().await;
        let user = user_token(&server).await;
        let admin = admin_token(&server).await;

        server
            .post("/api/v1/categories")
            .authorization_bearer(&user)
            .json(&json!({ "nom": "Mobilier" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .post("/api/v1/categories")
            .authorization_bearer(&admin)
            .json(&json!({ "nom": "Mobilier" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_category_in_use_cannot_be_deleted() {
        let server = server().await;
        let admin = admin_token(&server).await;

        let categories: Vec<Category> = server
            .get("/api/v1/categories")
            .add_query_param("q", "services")
            .authorization_bearer(&admin)
            .await
            .json();
        assert_eq!(categories.len(), 1);

        server
            .delete(&format!("/api/v1/categories/{}", categories[0].id.as_uuid()))
            .authorization_bearer(&admin)
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_product_list_filters_on_category_name() {
        let server = server().await;
        let token = user_token(&server).await;

        let products: Vec<ProductWithCategory> = server
            .get("/api/v1/products")
            .add_query_param("q", "bureautique")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product.designation, "Imprimante Laser");
        assert_eq!(products[0].categorie.as_ref().unwrap().nom, "Bureautique");
    }

    #[tokio::test]
    async fn test_invoiced_product_cannot_be_deleted() {
        let server = server().await;
        let admin = admin_token(&server).await;

        let products: Vec<ProductWithCategory> = server
            .get("/api/v1/products")
            .add_query_param("q", "développement")
            .authorization_bearer(&admin)
            .await
            .json();
        server
            .delete(&format!("/api/v1/products/{}", products[0].product.id.as_uuid()))
            .authorization_bearer(&admin)
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_product_with_unknown_category_rejected() {
        let server = server().await;
        let admin = admin_token(&server).await;

        server
            .post("/api/v1/products")
            .authorization_bearer(&admin)
            .json(&test_utils::ProductBuilder::new(core_kernel::CategoryId::new()).build())
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod invoice_tests {
    use super::*;

    #[tokio::test]
    async fn test_next_number_for_current_year() {
        let server = server().await;
        let token = user_token(&server).await;

        let next: NextNumberResponse = server
            .get("/api/v1/invoices/next-number")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(next.numero, format!("FACT-{}-001", Local::now().year()));
    }

    #[tokio::test]
    async fn test_backdated_invoice_numbered_in_current_year() {
        let server = server().await;
        let token = user_token(&server).await;
        let client = first_client(&server, &token).await;

        let draft = InvoiceBuilder::new()
            .with_client(client.id)
            .with_date(chrono::NaiveDate::from_ymd_opt(2023, 12, 20).unwrap())
            .with_line(InvoiceLineBuilder::new().with_designation("Maintenance").with_unit_price(dec!(2000)))
            .build_draft();

        let response = server
            .post("/api/v1/invoices")
            .authorization_bearer(&token)
            .json(&draft)
            .await;
        response.assert_status(StatusCode::CREATED);
        let invoice: Invoice = response.json();

        assert_eq!(invoice.numero, format!("FACT-{}-001", Local::now().year()));
        assert_eq!(invoice.date, chrono::NaiveDate::from_ymd_opt(2023, 12, 20).unwrap());
        assert_eq!(invoice.totals.total_ttc, dec!(2381));
    }

    fn oversized_line_body() -> serde_json::Value {
        json!({
            "date": "2026-01-10",
            "lines": [{
                "designation": "x",
                "quantite": "1000000000000000",
                "prix_unitaire": "1000000000000000"
            }]
        })
    }

    #[tokio::test]
    async fn test_compute_rejects_oversized_line() {
        let server = server().await;
        let token = user_token(&server).await;

        let response = server
            .post("/api/v1/invoices/compute")
            .authorization_bearer(&token)
            .json(&oversized_line_body())
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["details"][0], "Line 1: quantity exceeds 1000000000");
    }

    #[tokio::test]
    async fn test_issue_rejects_oversized_line() {
        let server = server().await;
        let token = user_token(&server).await;
        let client = first_client(&server, &token).await;
        let mut body = oversized_line_body();
        body["client_id"] = serde_json::to_value(client.id).unwrap();

        server
            .post("/api/v1/invoices")
            .authorization_bearer(&token)
            .json(&body)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let invoices: Vec<Invoice> = server
            .get("/api/v1/invoices")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(invoices.len(), 1);
    }

    #[tokio::test]
    async fn test_invoice_without_client_lists_every_problem() {
        let server = server().await;
        let token = user_token(&server).await;
        let draft = InvoiceBuilder::new()
            .with_line(InvoiceLineBuilder::new().with_designation("").with_unit_price(dec!(0)))
            .build_draft();

        let response = server
            .post("/api/v1/invoices")
            .authorization_bearer(&token)
            .json(&draft)
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        let details = body["details"].as_array().unwrap();
        assert_eq!(details[0], "A client must be selected");
        assert_eq!(details.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_client_rejected() {
        let server = server().await;
        let token = user_token(&server).await;
        let draft = InvoiceBuilder::new()
            .with_client(core_kernel::ClientId::new())
            .with_line(InvoiceLineBuilder::new())
            .build_draft();

        server
            .post("/api/v1/invoices")
            .authorization_bearer(&token)
            .json(&draft)
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_keeps_number() {
        let server = server().await;
        let token = user_token(&server).await;
        let client = first_client(&server, &token).await;
        let invoices: Vec<Invoice> = server
            .get("/api/v1/invoices")
            .authorization_bearer(&token)
            .await
            .json();
        let seeded = &invoices[0];

        let draft = InvoiceBuilder::new()
            .with_client(client.id)
            .with_date(seeded.date)
            .without_tax()
            .with_line(InvoiceLineBuilder::new().with_unit_price(dec!(2000)))
            .build_draft();
        let updated: Invoice = server
            .put(&format!("/api/v1/invoices/{}", seeded.id.as_uuid()))
            .authorization_bearer(&token)
            .json(&draft)
            .await
            .json();

        assert_eq!(updated.numero, "FACT-2023-001");
        assert_eq!(updated.totals.total_ttc, dec!(2001));
    }

    #[tokio::test]
    async fn test_compute_without_saving() {
        let server = server().await;
        let token = user_token(&server).await;
        let draft = InvoiceBuilder::new()
            .with_advance(dec!(381))
            .with_line(InvoiceLineBuilder::new().with_designation("Conseil").with_unit_price(dec!(2000)))
            .build_draft();

        let computed: ComputeResponse = server
            .post("/api/v1/invoices/compute")
            .authorization_bearer(&token)
            .json(&draft)
            .await
            .json();

        assert_eq!(computed.totals.total_ttc, dec!(2381));
        assert_eq!(computed.totals.reste_a_payer, dec!(2000));
        assert_eq!(computed.formatted.total_ttc, "2 381,000 DT");
        assert_eq!(computed.amount_in_words, "deux mille dinars");
        assert_eq!(computed.errors, vec!["A client must be selected".to_string()]);

        let invoices: Vec<Invoice> = server
            .get("/api/v1/invoices")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(invoices.len(), 1);
    }

    #[tokio::test]
    async fn test_preview_as_json_and_text() {
        let server = server().await;
        let token = user_token(&server).await;
        let invoices: Vec<Invoice> = server
            .get("/api/v1/invoices")
            .authorization_bearer(&token)
            .await
            .json();
        let path = format!("/api/v1/invoices/{}/preview", invoices[0].id.as_uuid());

        let preview: InvoicePreview = server.get(&path).authorization_bearer(&token).await.json();
        assert_eq!(preview.date, "15/12/2023");
        assert_eq!(preview.client.as_ref().unwrap().nom, "Société Example");
        assert_eq!(
            preview.amount_in_words,
            "deux mille trois cent quatre-vingt-un dinars"
        );

        let text = server
            .get(&path)
            .add_query_param("format", "text")
            .authorization_bearer(&token)
            .await
            .text();
        assert!(text.contains("FACT-2023-001"));
        assert!(text.contains("Arrêtée la présente facture à la somme de: deux mille trois cent quatre-vingt-un dinars"));
    }

    #[tokio::test]
    async fn test_delete_invoice() {
        let server = server().await;
        let token = user_token(&server).await;
        let invoices: Vec<Invoice> = server
            .get("/api/v1/invoices")
            .authorization_bearer(&token)
            .await
            .json();
        let path = format!("/api/v1/invoices/{}", invoices[0].id.as_uuid());

        server.delete(&path).authorization_bearer(&token).await.assert_status(StatusCode::NO_CONTENT);
        server.get(&path).authorization_bearer(&token).await.assert_status_not_found();
    }
}

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_counts_and_revenue() {
        let server = server().await;
        let token = user_token(&server).await;

        let dashboard: DashboardResponse = server
            .get("/api/v1/dashboard")
            .authorization_bearer(&token)
            .await
            .json();

        assert_eq!(dashboard.clients, 2);
        assert_eq!(dashboard.products, 3);
        assert_eq!(dashboard.invoices, 1);
        assert_eq!(dashboard.chiffre_affaires, dec!(2381));
        assert_eq!(dashboard.chiffre_affaires_formatted, "2 381,000 DT");
        assert_eq!(dashboard.par_devise, vec![Money::new(dec!(2381), Currency::DT)]);
        assert_eq!(dashboard.par_devise_formatted, vec!["2 381,000 DT".to_string()]);
        assert_eq!(dashboard.recent_invoices[0].client.as_deref(), Some("Société Example"));
    }

    #[tokio::test]
    async fn test_dashboard_totals_serialize_as_money() {
        let server = server().await;
        let token = user_token(&server).await;

        let body: serde_json::Value = server
            .get("/api/v1/dashboard")
            .authorization_bearer(&token)
            .await
            .json();

        let total = &body["par_devise"][0];
        assert_eq!(total["currency"], "DT");
        assert!(total["amount"].is_string());
        assert_eq!(body["par_devise_formatted"][0], "2 381,000 DT");
    }
}

mod format_tests {
    use super::*;

    #[tokio::test]
    async fn test_format_endpoints() {
        let server = server().await;
        let token = user_token(&server).await;

        let formatted: serde_json::Value = server
            .post("/api/v1/format/amount")
            .authorization_bearer(&token)
            .json(&json!({ "montant": "2380", "devise": "DT" }))
            .await
            .json();
        assert_eq!(formatted["formatted"], "2 380,000 DT");

        let words: serde_json::Value = server
            .post("/api/v1/format/words")
            .authorization_bearer(&token)
            .json(&json!({ "montant": "71", "devise": "EUR" }))
            .await
            .json();
        assert_eq!(words["words"], "soixante-et-onze euros");
    }
}
