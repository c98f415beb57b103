table! {
    records (recorded_at) {
        recorded_at -> Timestamptz,
        temperature_f -> Int2,
        humidity -> Int2,
    }
}

// Kept in sync with the table! declaration above, issued on every startup.
// Only duplicate_table (42P07) is swallowed, any other clash on the name is an error.
pub const CREATE_RECORDS_TABLE: &str = "DO $$
BEGIN
    CREATE TABLE records (
        recorded_at TIMESTAMP WITH TIME ZONE NOT NULL PRIMARY KEY,
        temperature_f SMALLINT NOT NULL,
        humidity SMALLINT NOT NULL CHECK (humidity >= 0 AND humidity <= 100)
    );
EXCEPTION
    WHEN duplicate_table THEN NULL;
END
$$";

pub const PROBE_RECORDS_TABLE: &str = "SELECT 1 FROM records LIMIT 0";
