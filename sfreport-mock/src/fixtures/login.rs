/// A successful login body for `server_url` carrying `session_id`.
#[must_use]
pub fn success(server_url: &str, session_id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soapenv:Body>
    <loginResponse>
      <result>
        <metadataServerUrl>{server_url}</metadataServerUrl>
        <passwordExpired>false</passwordExpired>
        <sandbox>false</sandbox>
        <serverUrl>{server_url}</serverUrl>
        <sessionId>{session_id}</sessionId>
        <userId>005000000000001AAA</userId>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

/// A SOAP fault body.
#[must_use]
pub fn fault(code: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:sf="urn:fault.partner.soap.sforce.com">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>{code}</faultcode>
      <faultstring>{message}</faultstring>
      <detail>
        <sf:LoginFault>
          <sf:exceptionCode>{code}</sf:exceptionCode>
        </sf:LoginFault>
      </detail>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}
