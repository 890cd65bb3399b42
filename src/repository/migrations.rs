pub const COMMANDS: [&str; 1] = [r#"
    CREATE TABLE IF NOT EXISTS records (
      id SERIAL PRIMARY KEY,
      message TEXT NOT NULL,
      timestamp TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );"#];
