// tests/operations_tests.rs
//
// O montador de transações: cabeçalho + itens + movimentações entram
// juntos ou não entram.

mod common;

use common::{count, onboard, test_state};
use pdv_backend::common::error::AppError;
use pdv_backend::models::inventory::NewProduct;
use pdv_backend::models::operations::{
    PurchaseLine, SaleLine, SyncPayload, SyncProduct, SyncPurchase, SyncSale,
};
use uuid::Uuid;

fn new_product(sku: &str, name: &str) -> NewProduct {
    NewProduct {
        sku: sku.to_string(),
        name: name.to_string(),
        category: None,
        unit: "unit".to_string(),
        barcode: None,
        reorder_point: 0,
        expiry_date: None,
        unit_price: 10.0,
    }
}

#[tokio::test]
async fn venda_gera_total_itens_e_saidas_correspondentes() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let p1 = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A", "Produto A"), 10)
        .await
        .unwrap();
    let p2 = state
        .inventory_service
        .create_product(business.id, &user, &new_product("B", "Produto B"), 10)
        .await
        .unwrap();

    let sale = state
        .operations_service
        .record_sale(
            business.id,
            &user,
            &[
                SaleLine {
                    product_id: p1.id,
                    qty: 2,
                    unit_price: 5.0,
                },
                SaleLine {
                    product_id: p2.id,
                    qty: 1,
                    unit_price: 3.0,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(sale.total_amount, 13.0);
    assert_eq!(sale.business_id, business.id);
    assert_eq!(sale.user_id, user.id);
    assert_eq!(count(&state, "sale_items").await, 2);

    // Exatamente uma saída por linha, com a quantidade negada
    let out_qtys = sqlx::query_scalar::<_, i64>(
        "SELECT qty FROM stock_movements WHERE source = 'sale' ORDER BY qty ASC",
    )
    .fetch_all(&state.db_pool)
    .await
    .unwrap();
    assert_eq!(out_qtys, vec![-2, -1]);
}

#[tokio::test]
async fn venda_com_linha_invalida_nao_escreve_nada() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let valid = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A", "Produto A"), 10)
        .await
        .unwrap();

    let movements_before = count(&state, "stock_movements").await;

    let err = state
        .operations_service
        .record_sale(
            business.id,
            &user,
            &[
                SaleLine {
                    product_id: valid.id,
                    qty: 1,
                    unit_price: 5.0,
                },
                // Esta linha referencia um produto que não existe
                SaleLine {
                    product_id: Uuid::new_v4(),
                    qty: 1,
                    unit_price: 5.0,
                },
            ],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ProductNotFound(_)));

    // Tudo ou nada: zero cabeçalho, zero item, zero movimentação nova
    assert_eq!(count(&state, "sales").await, 0);
    assert_eq!(count(&state, "sale_items").await, 0);
    assert_eq!(count(&state, "stock_movements").await, movements_before);
}

#[tokio::test]
async fn produto_de_outro_tenant_falha_a_operacao_inteira() {
    let state = test_state().await;
    let (business_a, user_a) = onboard(&state, "a@loja.com", "Loja A").await;
    let (business_b, user_b) = onboard(&state, "b@loja.com", "Loja B").await;

    let product_b = state
        .inventory_service
        .create_product(business_b.id, &user_b, &new_product("B", "Produto da B"), 10)
        .await
        .unwrap();

    // Loja A tentando vender produto da Loja B
    let err = state
        .operations_service
        .record_sale(
            business_a.id,
            &user_a,
            &[SaleLine {
                product_id: product_b.id,
                qty: 1,
                unit_price: 5.0,
            }],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ProductNotFound(_)));
    assert_eq!(count(&state, "sales").await, 0);

    // O saldo do produto da B ficou intocado
    let balance = state
        .inventory_service
        .product_balance(business_b.id, product_b.id)
        .await
        .unwrap();
    assert_eq!(balance, 10);
}

#[tokio::test]
async fn venda_sem_itens_e_rejeitada() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let err = state
        .operations_service
        .record_sale(business.id, &user, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyLineItems));
}

#[tokio::test]
async fn quantidade_nao_positiva_e_rejeitada_no_servico() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let product = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A", "Produto A"), 10)
        .await
        .unwrap();

    let err = state
        .operations_service
        .record_sale(
            business.id,
            &user,
            &[SaleLine {
                product_id: product.id,
                qty: -2,
                unit_price: 5.0,
            }],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidQuantity(-2)));
    assert_eq!(count(&state, "sales").await, 0);
}

#[tokio::test]
async fn compra_gera_entradas_com_custo_unitario() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let product = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A", "Produto A"), 0)
        .await
        .unwrap();

    let supplier = state
        .inventory_service
        .create_supplier(business.id, "Atacadão Central", Some("11 99999-0000"), None)
        .await
        .unwrap();

    let purchase = state
        .operations_service
        .record_purchase(
            business.id,
            &user,
            Some(supplier.id),
            &[PurchaseLine {
                product_id: product.id,
                qty: 30,
                unit_cost: 6.5,
            }],
        )
        .await
        .unwrap();

    assert_eq!(purchase.total_cost, 195.0);
    assert_eq!(purchase.supplier_id, Some(supplier.id));

    let (qty, unit_cost) = sqlx::query_as::<_, (i64, f64)>(
        "SELECT qty, unit_cost FROM stock_movements WHERE source = 'purchase'",
    )
    .fetch_one(&state.db_pool)
    .await
    .unwrap();
    assert_eq!(qty, 30);
    assert_eq!(unit_cost, 6.5);

    let balance = state
        .inventory_service
        .product_balance(business.id, product.id)
        .await
        .unwrap();
    assert_eq!(balance, 30);
}

#[tokio::test]
async fn compra_com_fornecedor_de_outro_tenant_nao_escreve_nada() {
    let state = test_state().await;
    let (business_a, user_a) = onboard(&state, "a@loja.com", "Loja A").await;
    let (business_b, _user_b) = onboard(&state, "b@loja.com", "Loja B").await;

    let product_a = state
        .inventory_service
        .create_product(business_a.id, &user_a, &new_product("A", "Produto A"), 0)
        .await
        .unwrap();

    let supplier_b = state
        .inventory_service
        .create_supplier(business_b.id, "Fornecedor da B", None, None)
        .await
        .unwrap();

    let err = state
        .operations_service
        .record_purchase(
            business_a.id,
            &user_a,
            Some(supplier_b.id),
            &[PurchaseLine {
                product_id: product_a.id,
                qty: 5,
                unit_cost: 1.0,
            }],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SupplierNotFound(_)));
    assert_eq!(count(&state, "purchases").await, 0);
    assert_eq!(count(&state, "purchase_items").await, 0);
}

// ---
// Sincronização offline
// ---

#[tokio::test]
async fn sync_cria_produto_por_sku_no_maximo_uma_vez() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let payload = SyncPayload {
        products: vec![SyncProduct {
            sku: "OFF-01".to_string(),
            name: "Criado offline".to_string(),
            barcode: None,
            reorder_point: 3,
        }],
        sales: vec![],
        purchases: vec![],
    };

    let first = state
        .operations_service
        .sync_batch(business.id, &user, &payload)
        .await
        .unwrap();
    assert_eq!(first.products, 1);

    // O MESMO lote de novo: o SKU já é conhecido, nada é criado
    let second = state
        .operations_service
        .sync_batch(business.id, &user, &payload)
        .await
        .unwrap();
    assert_eq!(second.products, 0);

    assert_eq!(count(&state, "products").await, 1);
}

#[tokio::test]
async fn sync_reaplicado_conta_vendas_em_dobro() {
    // Lacuna conhecida do protocolo: sem chave de idempotência por
    // transação, reenviar o lote duplica vendas e compras. Este teste
    // documenta o comportamento em vez de escondê-lo.
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let product = state
        .inventory_service
        .create_product(business.id, &user, &new_product("A", "Produto A"), 50)
        .await
        .unwrap();

    let payload = SyncPayload {
        products: vec![],
        sales: vec![SyncSale {
            items: vec![SaleLine {
                product_id: product.id,
                qty: 4,
                unit_price: 9.0,
            }],
        }],
        purchases: vec![SyncPurchase {
            items: vec![PurchaseLine {
                product_id: product.id,
                qty: 10,
                unit_cost: 5.0,
            }],
        }],
    };

    state
        .operations_service
        .sync_batch(business.id, &user, &payload)
        .await
        .unwrap();
    state
        .operations_service
        .sync_batch(business.id, &user, &payload)
        .await
        .unwrap();

    assert_eq!(count(&state, "sales").await, 2);
    assert_eq!(count(&state, "purchases").await, 2);

    // 50 - 4 + 10, duas vezes o par venda/compra
    let balance = state
        .inventory_service
        .product_balance(business.id, product.id)
        .await
        .unwrap();
    assert_eq!(balance, 62);
}

#[tokio::test]
async fn lote_com_venda_invalida_desfaz_o_lote_inteiro() {
    let state = test_state().await;
    let (business, user) = onboard(&state, "dona@loja.com", "Loja da Dona").await;

    let payload = SyncPayload {
        products: vec![SyncProduct {
            sku: "OFF-02".to_string(),
            name: "Criado offline".to_string(),
            barcode: None,
            reorder_point: 0,
        }],
        sales: vec![SyncSale {
            items: vec![SaleLine {
                product_id: Uuid::new_v4(), // não existe
                qty: 1,
                unit_price: 1.0,
            }],
        }],
        purchases: vec![],
    };

    let err = state
        .operations_service
        .sync_batch(business.id, &user, &payload)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ProductNotFound(_)));

    // Nem o produto do começo do lote sobreviveu
    assert_eq!(count(&state, "products").await, 0);
    assert_eq!(count(&state, "sales").await, 0);
    assert_eq!(count(&state, "stock_movements").await, 0);
}
