// tests/forecast_tests.rs
//
// A projeção em si é determinística e tem testes de unidade junto do
// serviço; aqui fica só o caminho completo serviço → banco.

mod common;

use common::{onboard, test_state};
use pdv_backend::common::error::AppError;
use pdv_backend::models::inventory::NewProduct;
use pdv_backend::models::operations::SaleLine;
use uuid::Uuid;

fn new_product(sku: &str) -> NewProduct {
    NewProduct {
        sku: sku.to_string(),
        name: "Produto".to_string(),
        category: None,
        unit: "unit".to_string(),
        barcode: None,
        reorder_point: 0,
        expiry_date: None,
        unit_price: 10.0,
    }
}

#[tokio::test]
async fn produto_sem_saidas_projeta_tudo_zero() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let product = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A"), 100)
        .await
        .unwrap();

    // Só abertura (IN): nenhuma saída ainda
    let forecast = state
        .forecast_service
        .forecast_demand(business.id, product.id, 30)
        .await
        .unwrap();

    assert_eq!(forecast.daily_rate, 0.0);
    assert_eq!(forecast.forecast, vec![0.0; 30]);
    assert_eq!(forecast.suggested_reorder, 0);
}

#[tokio::test]
async fn vendas_de_hoje_entram_na_projecao_de_amanha_nao() {
    // A janela móvel olha de ONTEM para trás: uma venda feita agora
    // ainda não muda a média de hoje.
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let product = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A"), 100)
        .await
        .unwrap();

    state
        .operations_service
        .record_sale(
            business.id,
            &user,
            &[SaleLine {
                product_id: product.id,
                qty: 30,
                unit_price: 10.0,
            }],
        )
        .await
        .unwrap();

    let forecast = state
        .forecast_service
        .forecast_demand(business.id, product.id, 30)
        .await
        .unwrap();

    assert_eq!(forecast.daily_rate, 0.0);
}

#[tokio::test]
async fn projecao_de_produto_alheio_e_not_found() {
    let state = test_state().await;
    let (business, _user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let err = state
        .forecast_service
        .forecast_demand(business.id, Uuid::new_v4(), 30)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ProductNotFound(_)));
}
