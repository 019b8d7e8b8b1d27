// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    MemoryStore, NOW, budi_area, create_test_actor, create_test_cause, period, uid,
};
use crate::{CoreError, NOTHING_TO_SAVE, SaveResult, build_target_list, save_targets};
use vast_audit::AuditEvent;
use vast_domain::{DomainError, Period, TargetType, TargetUser, Tier};

fn promotor_rows(store: &mut MemoryStore) -> Vec<TargetUser> {
    build_target_list(store, Tier::Promotor, period(3, 2025)).unwrap()
}

fn edit(rows: &mut [TargetUser], id: &str, value: i64) {
    for row in rows.iter_mut().filter(|r| r.user_id == uid(id)) {
        row.new_target = value;
    }
}

fn save(store: &mut MemoryStore, rows: &[TargetUser]) -> Result<SaveResult, CoreError> {
    save_targets(
        store,
        rows,
        period(3, 2025),
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
}

#[test]
fn test_only_edited_rows_are_written() {
    let mut store: MemoryStore = budi_area();
    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", 45);
    edit(&mut rows, "p-fina", 5);

    let result: SaveResult = save(&mut store, &rows).unwrap();

    assert_eq!(result.saved_count, 2);
    assert_eq!(result.message, "Berhasil menyimpan 2 target");
    let march: Period = period(3, 2025);
    assert_eq!(store.stored("p-dedi", march, TargetType::Primary), Some(45));
    assert_eq!(store.stored("p-fina", march, TargetType::Primary), Some(5));
    assert_eq!(store.stored("p-eka", march, TargetType::Primary), Some(50));
    let eka = store
        .targets
        .iter()
        .find(|t| t.user_id == uid("p-eka"))
        .unwrap();
    assert_eq!(eka.updated_by, "seed");
}

#[test]
fn test_written_records_are_attributed() {
    let mut store: MemoryStore = budi_area();
    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", 45);

    save(&mut store, &rows).unwrap();

    let dedi = store
        .targets
        .iter()
        .find(|t| t.user_id == uid("p-dedi"))
        .unwrap();
    assert_eq!(dedi.updated_by, "admin-1");
    assert_eq!(dedi.updated_at, NOW);
}

#[test]
fn test_unedited_save_is_a_no_op() {
    let mut store: MemoryStore = budi_area();
    let rows = promotor_rows(&mut store);

    let result: SaveResult = save(&mut store, &rows).unwrap();

    assert_eq!(result.saved_count, 0);
    assert_eq!(result.message, NOTHING_TO_SAVE);
    assert_eq!(result.audit_event, None);
    assert_eq!(store.upsert_calls, 0);
    assert!(store.audit_events.is_empty());
}

#[test]
fn test_upsert_overwrites_instead_of_duplicating() {
    let mut store: MemoryStore = budi_area();
    let before: usize = store.targets.len();
    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", 45);
    save(&mut store, &rows).unwrap();

    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", 47);
    save(&mut store, &rows).unwrap();

    assert_eq!(store.targets.len(), before);
    assert_eq!(
        store.stored("p-dedi", period(3, 2025), TargetType::Primary),
        Some(47)
    );
}

#[test]
fn test_dual_role_save_writes_as_sator_figure() {
    let mut store: MemoryStore = budi_area();
    let mut rows = build_target_list(&mut store, Tier::Sator, period(3, 2025)).unwrap();
    edit(&mut rows, "spv-budi", 10);

    let result = save(&mut store, &rows).unwrap();

    assert_eq!(result.saved_count, 1);
    let march: Period = period(3, 2025);
    assert_eq!(store.stored("spv-budi", march, TargetType::AsSator), Some(10));
    assert_eq!(store.stored("spv-budi", march, TargetType::Primary), Some(100));
}

#[test]
fn test_spv_row_saves_as_sator_pair() {
    let mut store: MemoryStore = budi_area();
    let mut rows = build_target_list(&mut store, Tier::Spv, period(3, 2025)).unwrap();
    rows[0].new_target_as_sator = Some(15);

    let result = save(&mut store, &rows).unwrap();

    assert_eq!(result.saved_count, 1);
    assert_eq!(
        store.stored("spv-budi", period(3, 2025), TargetType::AsSator),
        Some(15)
    );
}

#[test]
fn test_save_records_one_audit_event() {
    let mut store: MemoryStore = budi_area();
    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", 45);
    edit(&mut rows, "p-eka", 55);

    let result = save(&mut store, &rows).unwrap();

    assert_eq!(store.audit_events.len(), 1);
    let event: AuditEvent = result.audit_event.unwrap();
    assert_eq!(event.event_id, Some(1));
    assert_eq!(event.period, period(3, 2025));
    assert_eq!(event.actor.id, "admin-1");
    assert_eq!(event.action.name, "SaveTargets");
    assert_eq!(
        event.before.data,
        "[{\"user_id\":\"p-dedi\",\"target_type\":\"primary\",\"value\":40},\
         {\"user_id\":\"p-eka\",\"target_type\":\"primary\",\"value\":50}]"
    );
    assert_eq!(
        event.after.data,
        "[{\"user_id\":\"p-dedi\",\"target_type\":\"primary\",\"value\":45},\
         {\"user_id\":\"p-eka\",\"target_type\":\"primary\",\"value\":55}]"
    );
}

#[test]
fn test_write_failure_is_surfaced_verbatim() {
    let mut store: MemoryStore = budi_area();
    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", 45);
    store.fail_write = Some(String::from("UNIQUE constraint failed"));

    let result = save(&mut store, &rows);

    assert_eq!(
        result,
        Err(CoreError::WriteFailed {
            message: String::from("write failed: UNIQUE constraint failed"),
        })
    );
    assert_eq!(
        store.stored("p-dedi", period(3, 2025), TargetType::Primary),
        Some(40)
    );
}

#[test]
fn test_negative_target_is_rejected_before_writing() {
    let mut store: MemoryStore = budi_area();
    let mut rows = promotor_rows(&mut store);
    edit(&mut rows, "p-dedi", -5);

    let result = save(&mut store, &rows);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::NegativeTarget {
            user_id: uid("p-dedi"),
            value: -5,
        }))
    );
    assert_eq!(store.upsert_calls, 0);
}

#[test]
fn test_dual_role_sator_row_pair_edit_is_saved() {
    let mut store: MemoryStore = budi_area();
    let mut rows = build_target_list(&mut store, Tier::Sator, period(3, 2025)).unwrap();
    let budi: &mut TargetUser = rows
        .iter_mut()
        .find(|r| r.user_id == uid("spv-budi"))
        .unwrap();
    assert_eq!(budi.current_target_as_sator, Some(budi.current_target));
    budi.new_target_as_sator = Some(30);

    let result = save(&mut store, &rows).unwrap();

    assert_eq!(result.saved_count, 1);
    assert_ne!(result.message, NOTHING_TO_SAVE);
    let march: Period = period(3, 2025);
    assert_eq!(store.stored("spv-budi", march, TargetType::AsSator), Some(30));
    assert_eq!(store.stored("spv-budi", march, TargetType::Primary), Some(100));
}

#[test]
fn test_dual_role_sator_row_conflicting_edits_write_nothing() {
    let mut store: MemoryStore = budi_area();
    let mut rows = build_target_list(&mut store, Tier::Sator, period(3, 2025)).unwrap();
    let budi: &mut TargetUser = rows
        .iter_mut()
        .find(|r| r.user_id == uid("spv-budi"))
        .unwrap();
    budi.new_target = 40;
    budi.new_target_as_sator = Some(30);

    let result = save(&mut store, &rows);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ConflictingAsSatorEdit { .. }
        ))
    ));
    assert_eq!(store.upsert_calls, 0);
}
