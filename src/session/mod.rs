pub(crate) mod transition_session;
