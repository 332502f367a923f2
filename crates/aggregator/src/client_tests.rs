use super::*;

fn connect(table: &mut ClientTable, id: i64, name: &str, t: i64) {
    table.apply(&Event { timestamp: t, id, name: name.to_string(), kind: Kind::Connect });
}

fn disconnect(table: &mut ClientTable, id: i64, t: i64) {
    table.apply(&Event { timestamp: t, id, name: String::new(), kind: Kind::Disconnect });
}

#[test]
fn simple_connect_disconnect() {
    let mut table = ClientTable::new();
    connect(&mut table, 2, "Alice", 0);
    disconnect(&mut table, 2, 60);
    assert_eq!(table.get(2).unwrap().total_connected_seconds, 60);
    assert_eq!(table.get(2).unwrap().active_conn_count, 0);
}

#[test]
fn overlapping_connections_do_not_double_count() {
    let mut table = ClientTable::new();
    connect(&mut table, 3, "Bob", 0);
    connect(&mut table, 3, "Bob", 30);
    disconnect(&mut table, 3, 60);
    disconnect(&mut table, 3, 120);
    assert_eq!(table.get(3).unwrap().total_connected_seconds, 120);
}

#[test]
fn bare_disconnect_without_connect_is_noop() {
    let mut table = ClientTable::new();
    disconnect(&mut table, 4, 0);
    assert!(table.get(4).is_none());
}

#[test]
fn second_disconnect_in_a_row_is_noop() {
    let mut table = ClientTable::new();
    connect(&mut table, 5, "Carol", 0);
    disconnect(&mut table, 5, 10);
    disconnect(&mut table, 5, 9999);
    assert_eq!(table.get(5).unwrap().total_connected_seconds, 10);
}

#[test]
fn file_boundary_reset_preserves_total_but_drops_open_interval() {
    let mut table = ClientTable::new();
    connect(&mut table, 6, "Dave", 100);
    table.reset_file_boundary();
    let c = table.get(6).unwrap();
    assert_eq!(c.active_conn_count, 0);
    assert_eq!(c.last_connected_at, 0);
    assert_eq!(c.total_connected_seconds, 0);

    connect(&mut table, 6, "Dave", 200);
    disconnect(&mut table, 6, 260);
    assert_eq!(table.get(6).unwrap().total_connected_seconds, 60);
}

#[test]
fn most_recent_name_wins_on_new_interval() {
    let mut table = ClientTable::new();
    connect(&mut table, 7, "OldName", 0);
    disconnect(&mut table, 7, 10);
    connect(&mut table, 7, "NewName", 20);
    assert_eq!(table.get(7).unwrap().name, "NewName");
}

#[test]
fn different_id_same_name_are_distinct_clients() {
    let mut table = ClientTable::new();
    connect(&mut table, 8, "Same", 0);
    connect(&mut table, 9, "Same", 0);
    disconnect(&mut table, 8, 10);
    assert_eq!(table.get(8).unwrap().total_connected_seconds, 10);
    assert_eq!(table.get(9).unwrap().total_connected_seconds, 0);
}
