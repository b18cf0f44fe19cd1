/// Borrowed view over the request headers the policy engine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    pub access_control_request_private_network: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub(crate) fn origin(&self) -> Option<&'a str> {
        non_blank(self.origin)
    }

    pub(crate) fn requested_method(&self) -> Option<&'a str> {
        non_blank(self.access_control_request_method).map(str::trim)
    }

    pub(crate) fn requested_headers(&self) -> Option<&'a str> {
        non_blank(self.access_control_request_headers)
    }

    /// The header was sent, whatever its value.
    pub(crate) fn private_network_present(&self) -> bool {
        non_blank(self.access_control_request_private_network).is_some()
    }

    pub(crate) fn private_network_requested(&self) -> bool {
        self.access_control_request_private_network
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
