// src/models/forecast.rs

use serde::Serialize;
use utoipa::ToSchema;

// Projeção de demanda derivada do histórico de saídas (OUT) do produto.
// Dado o mesmo histórico e o mesmo "hoje", a saída é sempre idêntica.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandForecast {
    // Média diária dos últimos 30 dias corridos (dias sem venda contam 0)
    pub daily_rate: f64,

    // Um valor projetado por dia do horizonte, já arredondado a 2 casas
    pub forecast: Vec<f64>,

    // Cobertura de 14 dias + 10% de margem de segurança
    pub suggested_reorder: i64,
}
