/// Capabilities a render adapter needs from the host application.
///
/// Adapters receive an implementation of this trait instead of reaching for
/// host globals, so they can run against a mock host in tests. The host
/// guarantees that `recompute_active_document` consumes the current
/// `page_result` contents synchronously before returning; adapters rely on
/// this when they hand over a short-lived temp file.
pub trait HostServices {
    /// Look up a string preference. Returns the empty string when unset.
    fn string_pref(&self, key: &str) -> String;

    /// Report an informational message on the host's message channel.
    fn log_info(&self, msg: &str);

    /// Report an error on the host's message channel.
    fn log_error(&self, msg: &str);

    /// Recompute the active document. Must read any file the caller just
    /// pointed project state at before returning.
    fn recompute_active_document(&self);
}
