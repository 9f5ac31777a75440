//! Write and read flows through the wired service, below the HTTP layer

use proptest::prelude::*;

use domain_billing::{ListFilterRequest, RejectionReason};
use test_utils::{
    assert_amount, assert_rejected, assert_single_event_for, brl_literal_strategy,
    month_reference_strategy, valid_cpf_strategy, AmountFixtures, BillingRequestBuilder,
    TaxIdFixtures, TestBilling,
};

mod write_flow {
    use super::*;

    #[tokio::test]
    async fn test_reference_scenario_emits_one_event() {
        let billing = TestBilling::new().await;

        let record = billing
            .service
            .create(Some(BillingRequestBuilder::new().build()))
            .await
            .unwrap();

        assert_amount(&record.amount, "150,00");
        assert_single_event_for(&billing.publisher.events().await, &record);
    }

    #[tokio::test]
    async fn test_grouped_amount_is_stored_without_symbol() {
        let billing = TestBilling::new().await;

        let record = billing
            .service
            .create(Some(
                BillingRequestBuilder::new()
                    .amount(AmountFixtures::GROUPED_LITERAL)
                    .build(),
            ))
            .await
            .unwrap();

        assert_eq!(record.amount, AmountFixtures::grouped());
        assert_amount(&record.amount, "1.234,56");
    }

    #[tokio::test]
    async fn test_rejections_follow_check_order() {
        let billing = TestBilling::new().await;
        let create = |builder: BillingRequestBuilder| {
            let service = billing.service.clone();
            async move { service.create(Some(builder.build())).await }
        };

        assert_rejected(
            create(BillingRequestBuilder::new().due_date("").tax_id("").amount("")).await,
            RejectionReason::AllFieldsBlank,
        );
        assert_rejected(
            create(BillingRequestBuilder::new().due_date("2022-08-24T00:00")).await,
            RejectionReason::DueDateTooLong,
        );
        assert_rejected(
            create(BillingRequestBuilder::new().amount("")).await,
            RejectionReason::AmountBlank,
        );
        assert_rejected(
            create(BillingRequestBuilder::new().amount("R$ 150")).await,
            RejectionReason::AmountMalformed,
        );
        assert_rejected(
            create(BillingRequestBuilder::new().amount("R$ 1.000.000.000.000,00")).await,
            RejectionReason::AmountMalformed,
        );
        assert_rejected(
            create(BillingRequestBuilder::new().tax_id(TaxIdFixtures::INVALID)).await,
            RejectionReason::InvalidTaxId,
        );
        assert_rejected(
            create(BillingRequestBuilder::new().tax_id(TaxIdFixtures::UNREGISTERED)).await,
            RejectionReason::CustomerNotRegistered,
        );
        assert_rejected(billing.service.create(None).await, RejectionReason::AllFieldsBlank);

        assert!(billing.records.is_empty().await);
        assert!(billing.publisher.events().await.is_empty());
    }
}

mod read_flow {
    use super::*;

    #[tokio::test]
    async fn test_list_is_restartable() {
        let billing = TestBilling::new().await;
        billing
            .service
            .create(Some(BillingRequestBuilder::new().build()))
            .await
            .unwrap();

        let filter = ListFilterRequest::new(Some(TaxIdFixtures::REGISTERED.to_string()), None);
        let first = billing.service.list(filter.clone()).await.unwrap();
        let second = billing.service.list(filter).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_rejections() {
        let billing = TestBilling::new().await;

        assert_rejected(
            billing
                .service
                .list(ListFilterRequest::new(Some(String::new()), Some("13/2020".into())))
                .await,
            RejectionReason::InvalidMonthReference,
        );
        assert_rejected(
            billing.service.list(ListFilterRequest::default()).await,
            RejectionReason::NoFilterSupplied,
        );
    }
}

mod properties {
    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn any_brl_literal_is_accepted_for_a_registered_customer(amount in brl_literal_strategy()) {
            let record = runtime().block_on(async {
                let billing = TestBilling::new().await;
                billing
                    .service
                    .create(Some(BillingRequestBuilder::new().amount(amount.clone()).build()))
                    .await
            });
            prop_assert!(record.is_ok(), "{} was refused: {:?}", amount, record);
        }

        #[test]
        fn unknown_cpfs_are_not_registered(cpf in valid_cpf_strategy()) {
            prop_assume!(cpf != TaxIdFixtures::REGISTERED && cpf != TaxIdFixtures::REGISTERED_OTHER);
            let result = runtime().block_on(async {
                let billing = TestBilling::new().await;
                billing
                    .service
                    .create(Some(BillingRequestBuilder::new().tax_id(cpf).build()))
                    .await
            });
            prop_assert_eq!(
                result.err().and_then(|e| e.rejection()),
                Some(RejectionReason::CustomerNotRegistered)
            );
        }

        #[test]
        fn any_valid_month_is_a_usable_filter(month in month_reference_strategy()) {
            let result = runtime().block_on(async {
                let billing = TestBilling::new().await;
                billing
                    .service
                    .list(ListFilterRequest::new(None, Some(month)))
                    .await
            });
            prop_assert!(result.map(|records| records.is_empty()).unwrap_or(false));
        }
    }
}
