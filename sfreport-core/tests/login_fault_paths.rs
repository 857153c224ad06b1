use sfreport_core::{Credentials, LoginFault, ReportError, login_envelope, session_from_login_response};

#[test]
fn fault_with_only_code_keeps_empty_message() {
    let body = "<Envelope><Body><Fault><faultcode>sf:API_DISABLED</faultcode></Fault></Body></Envelope>";
    let fault = LoginFault::parse(body);
    assert_eq!(fault.code, "sf:API_DISABLED");
    assert_eq!(fault.message, "");
    let err: ReportError = fault.into();
    assert!(matches!(err, ReportError::Auth { ref code, .. } if code == "sf:API_DISABLED"));
}

#[test]
fn whitespace_and_prefixes_do_not_matter() {
    let body = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
        <s:Body>
          <p:loginResponse xmlns:p="urn:partner.soap.sforce.com">
            <p:result>
              <p:serverUrl>
                https://eu5.salesforce.com/services/Soap/u/38.0/00D
              </p:serverUrl>
              <p:sessionId>  SESSION  </p:sessionId>
            </p:result>
          </p:loginResponse>
        </s:Body>
      </s:Envelope>"#;
    let s = session_from_login_response(body, "v40.0").unwrap();
    assert_eq!(s.token(), "SESSION");
    assert_eq!(s.server_host(), "eu5.salesforce.com");
    assert_eq!(s.base_url(), "https://eu5.salesforce.com/services/data/v40.0/analytics");
}

#[test]
fn session_id_outside_result_is_ignored() {
    let body = "<Envelope><Body><sessionId>stray</sessionId></Body></Envelope>";
    let err = session_from_login_response(body, "v38.0").unwrap_err();
    assert_eq!(err, ReportError::auth("", "sessionId not found in response"));
}

#[test]
fn envelope_is_well_formed_for_hostile_input() {
    let creds = Credentials::new("</n1:username><evil/>", "]]>&", "tok");
    let env = login_envelope(&creds);
    assert!(!env.contains("<evil/>"));
    assert!(env.contains("]]&gt;&amp;tok"));
}

#[test]
fn refused_login_keeps_status() {
    let fault = LoginFault::parse(
        "<Envelope><Body><Fault><faultcode>INVALID_LOGIN</faultcode><faultstring>bad creds</faultstring></Fault></Body></Envelope>",
    );
    let err = fault.into_error(500);
    assert_eq!(err, ReportError::auth_status(500, "INVALID_LOGIN", "bad creds"));
    assert!(err.to_string().contains("server returned 500"));
}
