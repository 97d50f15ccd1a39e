// src/services/forecast_service.rs

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::{forecast::DemandForecast, inventory::StockMovement},
};

// Janela fixa da média móvel: os 30 dias corridos anteriores a "hoje",
// independente do horizonte pedido.
const TRAILING_WINDOW_DAYS: i64 = 30;

// Cobertura sugerida de reposição: 14 dias + 10% de margem.
const REORDER_COVERAGE_DAYS: usize = 14;
const REORDER_SAFETY_FACTOR: f64 = 1.10;

// Heurística de varejo: fim de semana vende um pouco mais.
const WEEKEND_WEIGHT: f64 = 1.15;

#[derive(Clone)]
pub struct ForecastService {
    inventory_repo: InventoryRepository,
    pool: SqlitePool,
}

impl ForecastService {
    pub fn new(inventory_repo: InventoryRepository, pool: SqlitePool) -> Self {
        Self {
            inventory_repo,
            pool,
        }
    }

    /// Projeta a demanda de um produto a partir do histórico de saídas.
    /// Só leitura: nenhuma escrita acontece aqui.
    pub async fn forecast_demand(
        &self,
        business_id: Uuid,
        product_id: Uuid,
        horizon_days: u32,
    ) -> Result<DemandForecast, AppError> {
        self.inventory_repo
            .find_product(&self.pool, business_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;

        let movements = self.inventory_repo.out_movements(product_id).await?;

        Ok(project_demand(
            &movements,
            Utc::now().date_naive(),
            horizon_days,
        ))
    }
}

/// O cálculo em si, determinístico: mesmo histórico + mesmo "hoje" =
/// mesma saída, bit a bit. Separado do serviço para fixar o relógio nos
/// testes.
pub fn project_demand(
    movements: &[StockMovement],
    today: NaiveDate,
    horizon_days: u32,
) -> DemandForecast {
    // Sem histórico de saída não há o que projetar
    if movements.is_empty() {
        return DemandForecast {
            daily_rate: 0.0,
            forecast: vec![0.0; horizon_days as usize],
            suggested_reorder: 0,
        };
    }

    // Agrega as saídas (em módulo) por dia de calendário
    let mut by_day: HashMap<NaiveDate, i64> = HashMap::new();
    for m in movements {
        *by_day.entry(m.created_at.date_naive()).or_insert(0) += m.qty.abs();
    }

    // Média móvel dos últimos 30 dias (de ontem para trás; dia sem venda = 0)
    let window_total: i64 = (1..=TRAILING_WINDOW_DAYS)
        .map(|i| {
            by_day
                .get(&(today - Duration::days(i)))
                .copied()
                .unwrap_or(0)
        })
        .sum();
    let avg = window_total as f64 / TRAILING_WINDOW_DAYS as f64;

    // Projeção dia a dia do horizonte, com peso de fim de semana
    let mut forecast = Vec::with_capacity(horizon_days as usize);
    for i in 1..=i64::from(horizon_days) {
        let day = today + Duration::days(i);
        let weight = if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            WEEKEND_WEIGHT
        } else {
            1.0
        };
        forecast.push(round2(avg * weight));
    }

    // Sugestão de reposição: soma dos primeiros 14 dias projetados + 10%
    let coverage: f64 = forecast.iter().take(REORDER_COVERAGE_DAYS).sum();
    let suggested_reorder = (coverage * REORDER_SAFETY_FACTOR).round() as i64;

    DemandForecast {
        daily_rate: round2(avg),
        forecast,
        suggested_reorder,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::MovementType;
    use chrono::TimeZone;

    // Uma saída de `qty` unidades em `date` (meio-dia UTC)
    fn out_movement(date: NaiveDate, qty: i64) -> StockMovement {
        StockMovement {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            qty: -qty.abs(),
            movement_type: MovementType::Out,
            source: "sale".to_string(),
            unit_cost: None,
            created_at: Utc
                .with_ymd_and_hms(date.year(), date.month(), date.day(), 12, 0, 0)
                .unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn produto_sem_saidas_projeta_zero() {
        let result = project_demand(&[], date(2026, 8, 5), 30);

        assert_eq!(result.daily_rate, 0.0);
        assert_eq!(result.forecast, vec![0.0; 30]);
        assert_eq!(result.suggested_reorder, 0);
    }

    #[test]
    fn horizonte_respeita_o_parametro() {
        let result = project_demand(&[], date(2026, 8, 5), 7);
        assert_eq!(result.forecast.len(), 7);
    }

    #[test]
    fn fim_de_semana_pesa_mais() {
        // 10 unidades/dia nos 30 dias anteriores a 2026-08-05 (quarta-feira)
        let today = date(2026, 8, 5);
        let movements: Vec<StockMovement> = (1..=30)
            .map(|i| out_movement(today - Duration::days(i), 10))
            .collect();

        let result = project_demand(&movements, today, 30);

        assert_eq!(result.daily_rate, 10.0);
        for (i, projected) in result.forecast.iter().enumerate() {
            let day = today + Duration::days(i as i64 + 1);
            let expected = if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                11.5 // 10 × 1.15
            } else {
                10.0
            };
            assert_eq!(*projected, expected, "dia {}", day);
        }
    }

    #[test]
    fn reposicao_cobre_14_dias_mais_margem() {
        let today = date(2026, 8, 5);
        let movements: Vec<StockMovement> = (1..=30)
            .map(|i| out_movement(today - Duration::days(i), 10))
            .collect();

        let result = project_demand(&movements, today, 30);

        // A sugestão é exatamente round(Σ primeiros 14 dias × 1.10)
        let coverage: f64 = result.forecast.iter().take(14).sum();
        assert_eq!(result.suggested_reorder, (coverage * 1.10).round() as i64);

        // Com taxa 10/dia e 4 dias de fim de semana na janela de 14:
        // 10×10 + 4×11.5 = 146 → 146 × 1.10 = 160.6 → 161
        assert_eq!(result.suggested_reorder, 161);
    }

    #[test]
    fn quatorze_dias_planos_de_dez_sugerem_154() {
        // A propriedade da fórmula em si: 14 projeções planas de 10.0
        // rendem round(140 × 1.10) = 154
        let flat = vec![10.0f64; 14];
        let coverage: f64 = flat.iter().sum();
        assert_eq!((coverage * REORDER_SAFETY_FACTOR).round() as i64, 154);
    }

    #[test]
    fn saidas_fora_da_janela_de_30_dias_nao_contam() {
        let today = date(2026, 8, 5);
        // Uma única saída enorme há 45 dias: fora da janela móvel
        let movements = vec![out_movement(today - Duration::days(45), 900)];

        let result = project_demand(&movements, today, 30);

        assert_eq!(result.daily_rate, 0.0);
        assert_eq!(result.suggested_reorder, 0);
    }

    #[test]
    fn mesmo_historico_mesmo_hoje_mesma_saida() {
        let today = date(2026, 8, 5);
        let movements: Vec<StockMovement> = (1..=10)
            .map(|i| out_movement(today - Duration::days(i), i))
            .collect();

        let a = project_demand(&movements, today, 30);
        let b = project_demand(&movements, today, 30);

        assert_eq!(a, b);
    }
}
