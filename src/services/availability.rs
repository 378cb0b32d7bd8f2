// src/services/availability.rs
//
// O motor de disponibilidade de horários: gera a grade do dia,
// resolve conflitos com a agenda do parceiro e decide, horário a
// horário, o que pode ser oferecido ao cliente.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AppointmentRepository,
    models::scheduling::{SlotGridOptions, SlotView},
};

// =========================================================================
//  GRADE DE HORÁRIOS (função pura)
// =========================================================================

/// Gera a sequência ordenada de horários candidatos de um dia:
/// de open_hour:00 até close_hour:00 inclusive, em passos fixos.
/// Não existe passo além do fechamento (sem 18:30 na janela padrão).
pub fn generate_time_slots(opts: &SlotGridOptions) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    let close = opts.close_hour * 60;

    let mut minutes = opts.open_hour * 60;
    while minutes <= close {
        if let Some(time) = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) {
            slots.push(time);
        }
        minutes += opts.step_minutes;
    }

    slots
}

// =========================================================================
//  PREDICADO DE DISPONIBILIDADE (função pura)
// =========================================================================

/// Decide se um horário candidato deve ser oferecido:
/// 1. sem data selecionada, nada está disponível;
/// 2. o instante completo (data + hora) precisa ser estritamente
///    futuro — sem antecedência mínima além de "depois de agora";
/// 3. o horário não pode estar no conjunto de conflitos do dia.
pub fn is_slot_available(
    selected_date: Option<NaiveDate>,
    slot: NaiveTime,
    now: NaiveDateTime,
    booked: &HashSet<NaiveTime>,
) -> bool {
    let Some(date) = selected_date else {
        return false;
    };

    let slot_date_time = date.and_time(slot);
    if slot_date_time <= now {
        return false;
    }

    !booked.contains(&slot)
}

/// Limites locais (inclusivos) do dia: 00:00:00 a 23:59:59.999
fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end_of_day =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("hora constante válida");
    (date.and_time(NaiveTime::MIN), date.and_time(end_of_day))
}

// =========================================================================
//  SERVIÇO
// =========================================================================

#[derive(Clone)]
pub struct AvailabilityService {
    repo: AppointmentRepository,
    grid: SlotGridOptions,
}

impl AvailabilityService {
    pub fn new(repo: AppointmentRepository) -> Self {
        Self {
            repo,
            grid: SlotGridOptions::default(),
        }
    }

    /// Resolve o conjunto de horários já ocupados do parceiro no dia.
    /// Retorna Result: quem chama decide entre degradar para conjunto
    /// vazio (exibição) ou falhar — a reserva em si é re-arbitrada
    /// pelo índice único na hora da escrita.
    pub async fn booked_times<'e, E>(
        &self,
        executor: E,
        partner_id: Uuid,
        date: NaiveDate,
    ) -> Result<HashSet<NaiveTime>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (day_start, day_end) = day_bounds(date);

        let times = self
            .repo
            .find_booked_times(executor, partner_id, day_start, day_end)
            .await?;

        Ok(times.into_iter().map(|dt| dt.time()).collect())
    }

    /// Grade do dia com a flag de disponibilidade por horário.
    pub fn day_slots(
        &self,
        selected_date: Option<NaiveDate>,
        now: NaiveDateTime,
        booked: &HashSet<NaiveTime>,
    ) -> Vec<SlotView> {
        generate_time_slots(&self.grid)
            .into_iter()
            .map(|time| SlotView {
                time,
                available: is_slot_available(selected_date, time, now, booked),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grade_padrao_tem_21_horarios_das_8_as_18() {
        let slots = generate_time_slots(&SlotGridOptions::default());

        assert_eq!(slots.len(), 21);
        assert_eq!(slots[0], hm(8, 0));
        assert_eq!(*slots.last().unwrap(), hm(18, 0));

        // Passos exatos de 30 minutos entre horários consecutivos
        for pair in slots.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::minutes(30));
        }
    }

    #[test]
    fn grade_e_deterministica() {
        let opts = SlotGridOptions::default();
        assert_eq!(generate_time_slots(&opts), generate_time_slots(&opts));
    }

    #[test]
    fn grade_respeita_janela_customizada() {
        let opts = SlotGridOptions {
            open_hour: 9,
            close_hour: 12,
            step_minutes: 60,
        };
        assert_eq!(
            generate_time_slots(&opts),
            vec![hm(9, 0), hm(10, 0), hm(11, 0), hm(12, 0)]
        );
    }

    #[test]
    fn horario_passado_nunca_e_oferecido() {
        let today = date(2024, 1, 1);
        let now = today.and_time(hm(10, 15));
        let booked = HashSet::new();

        // 10:00 já passou; 10:30 ainda não
        assert!(!is_slot_available(Some(today), hm(10, 0), now, &booked));
        assert!(is_slot_available(Some(today), hm(10, 30), now, &booked));
    }

    #[test]
    fn horario_exatamente_agora_nao_e_oferecido() {
        let today = date(2024, 1, 1);
        let now = today.and_time(hm(10, 0));
        // "estritamente depois de agora"
        assert!(!is_slot_available(Some(today), hm(10, 0), now, &HashSet::new()));
    }

    #[test]
    fn dia_passado_fica_todo_indisponivel() {
        let now = date(2024, 1, 2).and_time(hm(9, 0));
        let yesterday = date(2024, 1, 1);

        for slot in generate_time_slots(&SlotGridOptions::default()) {
            assert!(!is_slot_available(Some(yesterday), slot, now, &HashSet::new()));
        }
    }

    #[test]
    fn horario_em_conflito_e_bloqueado() {
        let day = date(2024, 1, 1);
        let now = date(2023, 12, 31).and_time(hm(9, 0));
        let booked: HashSet<NaiveTime> = [hm(14, 0)].into_iter().collect();

        assert!(!is_slot_available(Some(day), hm(14, 0), now, &booked));
        assert!(is_slot_available(Some(day), hm(14, 30), now, &booked));
    }

    #[test]
    fn sem_data_selecionada_nada_esta_disponivel() {
        let now = date(2024, 1, 1).and_time(hm(0, 0));

        for slot in generate_time_slots(&SlotGridOptions::default()) {
            assert!(!is_slot_available(None, slot, now, &HashSet::new()));
        }
    }

    #[test]
    fn limites_do_dia_sao_inclusivos() {
        let (start, end) = day_bounds(date(2024, 1, 1));
        assert_eq!(start, date(2024, 1, 1).and_time(NaiveTime::MIN));
        assert!(end > date(2024, 1, 1).and_time(hm(23, 59)));
        assert!(end < date(2024, 1, 2).and_time(NaiveTime::MIN));
    }
}
