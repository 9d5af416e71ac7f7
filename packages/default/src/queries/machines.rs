use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::machines::{Kit, Machine, NewMachine, NewSpare, Spare};
use crate::models::validation::Validate;
use sqlx::PgPool;
use tracing::info;

pub async fn insert_spare(pool: &PgPool, spare: &NewSpare) -> ModelResult<Spare> {
    spare.full_clean()?;
    let row = sqlx::query_as::<_, Spare>("INSERT INTO spares (name) VALUES ($1) RETURNING *")
        .bind(&spare.name)
        .fetch_one(pool)
        .await
        .map_err(|e| ModelError::from_write(Spare::MODEL_NAME, e))?;

    info!("✅ inserted spare: {}", row.name);
    Ok(row)
}

pub async fn update_spare(pool: &PgPool, id: i32, spare: &NewSpare) -> ModelResult<Spare> {
    spare.full_clean()?;
    sqlx::query_as::<_, Spare>("UPDATE spares SET name = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(&spare.name)
        .fetch_optional(pool)
        .await
        .map_err(|e| ModelError::from_write(Spare::MODEL_NAME, e))?
        .ok_or(ModelError::NotFound {
            model: Spare::MODEL_NAME,
            id,
        })
}

pub async fn insert_machine(pool: &PgPool, machine: &NewMachine) -> ModelResult<Machine> {
    machine.full_clean()?;
    let row = sqlx::query_as::<_, Machine>("INSERT INTO machines (name) VALUES ($1) RETURNING *")
        .bind(&machine.name)
        .fetch_one(pool)
        .await
        .map_err(|e| ModelError::from_write(Machine::MODEL_NAME, e))?;

    info!("✅ inserted machine: {}", row.name);
    Ok(row)
}

pub async fn update_machine(pool: &PgPool, id: i32, machine: &NewMachine) -> ModelResult<Machine> {
    machine.full_clean()?;
    sqlx::query_as::<_, Machine>("UPDATE machines SET name = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(&machine.name)
        .fetch_optional(pool)
        .await
        .map_err(|e| ModelError::from_write(Machine::MODEL_NAME, e))?
        .ok_or(ModelError::NotFound {
            model: Machine::MODEL_NAME,
            id,
        })
}

/// Records that `count` units of a spare go into a machine.
pub async fn insert_kit(
    pool: &PgPool,
    machine_id: i32,
    spare_id: i32,
    count: i32,
) -> ModelResult<Kit> {
    let kit = sqlx::query_as::<_, Kit>(
        "INSERT INTO kits (machine_id, spare_id, count) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(machine_id)
    .bind(spare_id)
    .bind(count)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(Kit::MODEL_NAME, e))?;

    info!(
        "✅ kit {}: {} x spare {} for machine {}",
        kit.id, kit.count, kit.spare_id, kit.machine_id
    );
    Ok(kit)
}

pub async fn update_kit_count(pool: &PgPool, id: i32, count: i32) -> ModelResult<Kit> {
    sqlx::query_as::<_, Kit>("UPDATE kits SET count = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(count)
        .fetch_optional(pool)
        .await?
        .ok_or(ModelError::NotFound {
            model: Kit::MODEL_NAME,
            id,
        })
}

pub async fn list_kits_for_machine(pool: &PgPool, machine_id: i32) -> ModelResult<Vec<Kit>> {
    let kits = sqlx::query_as::<_, Kit>("SELECT * FROM kits WHERE machine_id = $1 ORDER BY id")
        .bind(machine_id)
        .fetch_all(pool)
        .await?;
    Ok(kits)
}

/// Distinct spares used by a machine through its kits.
pub async fn list_spares_for_machine(pool: &PgPool, machine_id: i32) -> ModelResult<Vec<Spare>> {
    let spares = sqlx::query_as::<_, Spare>(
        r#"
        SELECT DISTINCT s.* FROM spares s
        JOIN kits k ON k.spare_id = s.id
        WHERE k.machine_id = $1
        ORDER BY s.id
        "#,
    )
    .bind(machine_id)
    .fetch_all(pool)
    .await?;
    Ok(spares)
}

pub async fn list_machines_for_spare(pool: &PgPool, spare_id: i32) -> ModelResult<Vec<Machine>> {
    let machines = sqlx::query_as::<_, Machine>(
        r#"
        SELECT DISTINCT m.* FROM machines m
        JOIN kits k ON k.machine_id = m.id
        WHERE k.spare_id = $1
        ORDER BY m.id
        "#,
    )
    .bind(spare_id)
    .fetch_all(pool)
    .await?;
    Ok(machines)
}
